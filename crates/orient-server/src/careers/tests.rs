use super::*;

fn write_store(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("career_paths.json");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_load_and_lookup() {
    let (_dir, path) = write_store(
        r#"{
            "Carpenter": {"stages": ["Apprentice", "Journeyman", "Master"]},
            "Welder": {"stages": ["Trainee", "Certified"]}
        }"#,
    );

    let store = CareerPathStore::load(&path).unwrap();

    assert_eq!(store.len(), 2);
    let mut titles = store.titles();
    titles.sort_unstable();
    assert_eq!(titles, ["Carpenter", "Welder"]);

    let carpenter = store.get("Carpenter").unwrap();
    assert_eq!(carpenter["stages"][2], "Master");
    assert!(store.get("Astronaut").is_none());
}

#[test]
fn test_load_missing_file() {
    assert!(matches!(
        CareerPathStore::load(std::path::Path::new("/nonexistent/paths.json")),
        Err(CareersError::SourceNotFound { .. })
    ));
}

#[test]
fn test_load_rejects_non_object() {
    let (_dir, path) = write_store(r#"["Carpenter"]"#);

    assert!(matches!(
        CareerPathStore::load(&path),
        Err(CareersError::Malformed { .. })
    ));
}

#[test]
fn test_empty_store() {
    let store = CareerPathStore::empty();
    assert!(store.is_empty());
    assert!(store.titles().is_empty());
}
