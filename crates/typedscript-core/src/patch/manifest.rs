//! JSON manifest editing (package.json and friends)

use crate::error::{ScaffoldError, ScaffoldResult};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// File name of the generated package manifest
pub const PACKAGE_JSON: &str = "package.json";

fn read_object(path: &Path) -> ScaffoldResult<Map<String, Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ScaffoldError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(ScaffoldError::io(path, e)),
    };

    let value: Value =
        serde_json::from_str(&content).map_err(|source| ScaffoldError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ScaffoldError::ManifestShape {
            path: path.to_path_buf(),
        }),
    }
}

fn write_object(path: &Path, map: Map<String, Value>) -> ScaffoldResult<()> {
    let mut rendered = serde_json::to_string_pretty(&Value::Object(map)).map_err(|source| {
        ScaffoldError::ManifestParse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    rendered.push('\n');
    std::fs::write(path, rendered).map_err(|e| ScaffoldError::io(path, e))
}

/// Replace one top-level field of a JSON document.
///
/// `transform` receives the current value (if any) and returns the new one.
/// If it fails the file is left as it was. Key order is kept; a new field is
/// appended at the end. The editor does no merging of its own.
pub fn edit_field<F>(path: &Path, field: &str, transform: F) -> ScaffoldResult<()>
where
    F: FnOnce(Option<Value>) -> ScaffoldResult<Value>,
{
    let mut map = read_object(path)?;

    let updated = transform(map.get(field).cloned())?;
    match map.get_mut(field) {
        Some(slot) => *slot = updated,
        None => {
            map.insert(field.to_string(), updated);
        }
    }

    write_object(path, map)?;
    debug!("Updated `{}` in {}", field, path.display());
    Ok(())
}

/// Read a single top-level field
pub fn read_field(path: &Path, field: &str) -> ScaffoldResult<Option<Value>> {
    Ok(read_object(path)?.remove(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const PACKAGE: &str = r#"{
  "name": "template",
  "version": "0.1.0",
  "scripts": {
    "start": "node dist/index.js"
  },
  "dependencies": {}
}
"#;

    #[test]
    fn test_rename_keeps_key_order_and_formatting() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PACKAGE_JSON);
        fs::write(&file, PACKAGE).unwrap();

        edit_field(&file, "name", |_| Ok(json!("demo"))).unwrap();

        let expected = PACKAGE.replace("\"template\"", "\"demo\"");
        assert_eq!(fs::read_to_string(&file).unwrap(), expected);
    }

    #[test]
    fn test_same_edit_twice_is_idempotent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PACKAGE_JSON);
        fs::write(&file, PACKAGE).unwrap();

        edit_field(&file, "name", |_| Ok(json!("demo"))).unwrap();
        let once = fs::read_to_string(&file).unwrap();
        edit_field(&file, "name", |_| Ok(json!("demo"))).unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), once);
    }

    #[test]
    fn test_transform_sees_current_value() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PACKAGE_JSON);
        fs::write(&file, PACKAGE).unwrap();

        edit_field(&file, "scripts", |current| {
            let mut scripts = current.unwrap_or_else(|| json!({}));
            scripts["dev"] = json!("tsx watch src/index.ts");
            Ok(scripts)
        })
        .unwrap();

        let scripts = read_field(&file, "scripts").unwrap().unwrap();
        assert_eq!(scripts["start"], "node dist/index.js");
        assert_eq!(scripts["dev"], "tsx watch src/index.ts");
    }

    #[test]
    fn test_missing_field_is_appended() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PACKAGE_JSON);
        fs::write(&file, "{\"name\": \"x\"}").unwrap();

        edit_field(&file, "private", |current| {
            assert!(current.is_none());
            Ok(json!(true))
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "{\n  \"name\": \"x\",\n  \"private\": true\n}\n"
        );
    }

    #[test]
    fn test_failed_transform_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PACKAGE_JSON);
        fs::write(&file, PACKAGE).unwrap();

        let err = edit_field(&file, "scripts", |_| {
            Err(ScaffoldError::ManifestField {
                path: PathBuf::from(PACKAGE_JSON),
                field: "scripts".into(),
            })
        })
        .unwrap_err();

        assert!(matches!(err, ScaffoldError::ManifestField { .. }));
        assert_eq!(fs::read_to_string(&file).unwrap(), PACKAGE);
    }

    #[test]
    fn test_parse_failures_are_fatal() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ name: ").unwrap();
        let array = dir.path().join("array.json");
        fs::write(&array, "[1, 2]").unwrap();

        assert!(matches!(
            edit_field(&broken, "name", |v| Ok(v.unwrap_or_default())),
            Err(ScaffoldError::ManifestParse { .. })
        ));
        assert!(matches!(
            edit_field(&array, "name", |v| Ok(v.unwrap_or_default())),
            Err(ScaffoldError::ManifestShape { .. })
        ));
        assert!(matches!(
            edit_field(&dir.path().join("missing.json"), "name", |v| Ok(v.unwrap_or_default())),
            Err(ScaffoldError::FileNotFound(_))
        ));
    }
}
