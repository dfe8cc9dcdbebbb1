//! Project request model: name, type and requested feature tokens

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::templates::Template;
use std::fmt;
use std::str::FromStr;

/// Web framework backing a service project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Framework {
    #[default]
    Express,
    Fastify,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::Express, Framework::Fastify];

    pub fn id(&self) -> &'static str {
        match self {
            Framework::Express => "express",
            Framework::Fastify => "fastify",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::Express => "Express",
            Framework::Fastify => "Fastify",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Framework {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "express" => Ok(Framework::Express),
            "fastify" => Ok(Framework::Fastify),
            _ => Err(ScaffoldError::UnknownFramework(s.to_string())),
        }
    }
}

/// Kind of project to scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    /// Minimal Express starter
    Base,
    /// Network service; gets the `-service` name suffix
    Service(Framework),
    /// Publishable library
    Package,
    /// Bare manifest and README
    Empty,
    /// Workspace root with `apps/` and `packages/`
    Monorepo,
}

impl ProjectType {
    /// Parse a type token; `framework` only matters for services
    pub fn parse(token: &str, framework: Framework) -> ScaffoldResult<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(ProjectType::Base),
            "service" => Ok(ProjectType::Service(framework)),
            "package" => Ok(ProjectType::Package),
            "empty" => Ok(ProjectType::Empty),
            "monorepo" => Ok(ProjectType::Monorepo),
            _ => Err(ScaffoldError::UnknownProjectType(token.to_string())),
        }
    }

    /// Bundled template this type is generated from
    pub fn template(&self) -> Template {
        match self {
            ProjectType::Base => Template::Base,
            ProjectType::Service(Framework::Express) => Template::Express,
            ProjectType::Service(Framework::Fastify) => Template::Fastify,
            ProjectType::Package => Template::Package,
            ProjectType::Empty => Template::Empty,
            ProjectType::Monorepo => Template::Monorepo,
        }
    }

    /// Apply the naming convention for this type
    pub fn resolve_name(&self, name: &str) -> String {
        match self {
            ProjectType::Service(_) if !name.ends_with(SERVICE_SUFFIX) => {
                format!("{}{}", name, SERVICE_SUFFIX)
            }
            _ => name.to_string(),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectType::Base => f.write_str("base"),
            ProjectType::Service(framework) => write!(f, "service ({})", framework),
            ProjectType::Package => f.write_str("package"),
            ProjectType::Empty => f.write_str("empty"),
            ProjectType::Monorepo => f.write_str("monorepo"),
        }
    }
}

const SERVICE_SUFFIX: &str = "-service";

/// A single scaffolding request, fixed before the run starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    name: String,
    project_type: ProjectType,
    features: Vec<String>,
}

impl ProjectRequest {
    /// Build a request, validating the name and de-duplicating feature tokens.
    ///
    /// Both the typed name and the resolved name must be valid, so a suffix
    /// can't push a service past the npm length limit. Tokens keep the
    /// position of their first occurrence.
    pub fn new<I, S>(name: &str, project_type: ProjectType, features: I) -> ScaffoldResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        validate_name(name)?;
        validate_name(&project_type.resolve_name(name))?;

        let mut tokens: Vec<String> = Vec::new();
        for feature in features {
            let token = feature.as_ref().trim().to_ascii_lowercase();
            if token.is_empty() || tokens.contains(&token) {
                continue;
            }
            tokens.push(token);
        }

        Ok(Self {
            name: name.to_string(),
            project_type,
            features: tokens,
        })
    }

    /// Name as typed by the user
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name after the type-specific convention (directory and manifest name)
    pub fn resolved_name(&self) -> String {
        self.project_type.resolve_name(&self.name)
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    /// Feature tokens in application order
    pub fn features(&self) -> &[String] {
        &self.features
    }
}

/// Check that a name is usable both as a directory and as an npm package name
pub fn validate_name(name: &str) -> ScaffoldResult<()> {
    let invalid = |reason| ScaffoldError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("name must not be a relative path component"));
    }
    if name.len() > 214 {
        return Err(invalid("name must be at most 214 characters"));
    }

    let mut chars = name.chars();
    if !chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(invalid("name must start with a lowercase letter or digit"));
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
    {
        return Err(invalid(
            "name may only contain lowercase letters, digits, '-', '_' and '.'",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_gets_suffix() {
        let service = ProjectType::Service(Framework::Express);
        assert_eq!(service.resolve_name("orders"), "orders-service");
        assert_eq!(service.resolve_name("orders-service"), "orders-service");
        assert_eq!(ProjectType::Package.resolve_name("orders"), "orders");
    }

    #[test]
    fn test_parse_project_type() {
        assert_eq!(
            ProjectType::parse("Service", Framework::Fastify).unwrap(),
            ProjectType::Service(Framework::Fastify)
        );
        assert_eq!(
            ProjectType::parse("monorepo", Framework::default()).unwrap(),
            ProjectType::Monorepo
        );
        assert!(matches!(
            ProjectType::parse("desktop", Framework::default()),
            Err(ScaffoldError::UnknownProjectType(_))
        ));
    }

    #[test]
    fn test_type_selects_template() {
        assert_eq!(
            ProjectType::Service(Framework::Fastify).template(),
            Template::Fastify
        );
        assert_eq!(ProjectType::Base.template(), Template::Base);
        assert_eq!(ProjectType::Empty.template(), Template::Empty);
    }

    #[test]
    fn test_features_deduplicated_in_first_occurrence_order() {
        let request = ProjectRequest::new(
            "demo",
            ProjectType::Base,
            ["linting", "env-variables", "Linting", " ", "hot-reload"],
        )
        .unwrap();
        assert_eq!(
            request.features(),
            &["linting", "env-variables", "hot-reload"]
        );
    }

    #[test]
    fn test_name_validation() {
        assert!(validate_name("demo").is_ok());
        assert!(validate_name("my-app.v2_x").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("Demo").is_err());
        assert!(validate_name("-demo").is_err());
        assert!(validate_name("nested/demo").is_err());
        assert!(validate_name("has space").is_err());
    }

    #[test]
    fn test_resolved_service_name_respects_length_limit() {
        let service = ProjectType::Service(Framework::Express);

        let at_limit = "a".repeat(214);
        assert!(ProjectRequest::new(&at_limit, ProjectType::Package, [""; 0]).is_ok());
        assert!(matches!(
            ProjectRequest::new(&at_limit, service, [""; 0]),
            Err(ScaffoldError::InvalidName { .. })
        ));

        let fits = "a".repeat(214 - SERVICE_SUFFIX.len());
        let request = ProjectRequest::new(&fits, service, [""; 0]).unwrap();
        assert_eq!(request.resolved_name().len(), 214);
    }
}
