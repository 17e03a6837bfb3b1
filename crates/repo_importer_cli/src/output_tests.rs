use super::*;
use config_manager::build_repository_schema;
use config_manager::settings::Visibility;
use tempfile::TempDir;

fn repository() -> Repository {
    Repository {
        name: "api".to_string(),
        owner: "my-org".to_string(),
        visibility: Visibility::Private,
        default_branch: "main".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_write_document_creates_directory() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("repos");

    let path = write_document(&output_dir, &repository()).unwrap();

    assert_eq!(path, output_dir.join("api.yaml"));
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("visibility: private"));
    assert!(contents.contains("default_branch: main"));
}

#[test]
fn test_write_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".schemas").join("repository-config.schema.json");

    write_schema(&path, &build_repository_schema().unwrap()).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["title"], "Repository Configuration");
}

#[test]
fn test_write_failure_names_path() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "not a directory").unwrap();

    let result = write_document(&blocker, &repository());

    match result {
        Err(Error::Output { path, .. }) => assert!(path.starts_with(&blocker)),
        other => panic!("unexpected result {:?}", other),
    }
}
