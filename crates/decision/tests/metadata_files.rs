use anyhow::Result;
use tierml_decision::{DecisionFunction, LinearFunction, ModelMetadata};

const METADATA_JSON: &str = r#"
{
  "schema_version": 1,
  "version": "ranker-2024.1",
  "features": [
    { "name": "file/len", "kind": "float", "default": 0.0, "required": true },
    { "name": "file/kind", "kind": "category", "categories": ["source", "test"], "default": -1.0 },
    { "name": "usage/is_local", "kind": "binary", "default": 0.0 }
  ],
  "weights": [0.42, 1.3, -0.2],
  "intercept": 0.1
}
"#;

const METADATA_TOML: &str = r#"
schema_version = 1
version = "ranker-2024.1"
weights = [1.0, 2.0]
intercept = 0.5

[[features]]
name = "file/len"
kind = "float"
required = true

[[features]]
name = "file/depth"
kind = "float"
default = -1.0
"#;

#[test]
fn loads_a_json_metadata_file() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("ranker.json");
    std::fs::write(&path, METADATA_JSON)?;

    let metadata = ModelMetadata::from_file(&path)?;
    assert_eq!(metadata.version(), Some("ranker-2024.1"));
    assert_eq!(metadata.features().len(), 3);

    let function = LinearFunction::from_metadata(&metadata)?;
    assert_eq!(function.required_features(), &["file/len".to_owned()]);
    Ok(())
}

#[test]
fn loads_a_toml_metadata_file() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("ranker.toml");
    std::fs::write(&path, METADATA_TOML)?;

    let function = LinearFunction::from_file(&path)?;
    assert_eq!(function.version(), Some("ranker-2024.1"));
    assert_eq!(function.predict(&[3.0, 4.0]), 3.0 + 8.0 + 0.5);
    Ok(())
}

#[test]
fn missing_file_error_names_the_path() {
    let err = ModelMetadata::from_file(std::path::Path::new("/no/such/ranker.json")).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("/no/such/ranker.json"), "{msg}");
}
