use std::fs;
use tempfile::TempDir;
use serial_test::serial;

use unibind::commands::generate::{self, GenerateArgs};
use unibind::commands::init;

#[test]
#[serial]
fn test_init_creates_project_structure() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = init::execute("physics");
    assert!(result.is_ok(), "Init command should succeed");

    let project_path = temp_dir.path().join("physics");
    assert!(project_path.join("unibind.toml").exists(), "unibind.toml should exist");
    assert!(
        project_path.join("include/physics.h").exists(),
        "include/physics.h should exist"
    );

    let manifest = fs::read_to_string(project_path.join("unibind.toml")).unwrap();
    assert!(manifest.contains("name = \"physics\""));
    assert!(manifest.contains("include/physics.h"));
    assert!(!manifest.contains("{{LIB_NAME}}"));
}

#[test]
#[serial]
fn test_init_fails_if_directory_exists() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    fs::create_dir("audio").unwrap();

    let result = init::execute("audio");
    assert!(result.is_err(), "Init should fail if directory exists");
    assert!(result.unwrap_err().to_string().contains("already exists"));
}

#[test]
#[serial]
fn test_init_rejects_invalid_name() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    assert!(init::execute("my-lib").is_err());
    assert!(!temp_dir.path().join("my-lib").exists());
}

#[test]
#[serial]
fn test_generate_from_initialized_project() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    init::execute("physics").unwrap();

    generate::execute(&GenerateArgs {
        manifest: Some("physics/unibind.toml".to_string()),
        ..Default::default()
    })
    .unwrap();

    let generated = temp_dir.path().join("physics/bindings/CppNative.cs");
    let content = fs::read_to_string(generated).unwrap();
    assert!(content.contains("const string LIB_NAME = \"libphysics.so\"; // Linux"));
    assert!(content.contains("public static extern int add(int a, int b);"));
    assert!(content.contains("/// <returns>The sum of the two integers</returns>"));
}
