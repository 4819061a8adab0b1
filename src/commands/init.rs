use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::config::{validate_lib_name, MANIFEST_FILE};

const MANIFEST_TEMPLATE: &str = include_str!("../../templates/unibind.toml");
const HEADER_TEMPLATE: &str = include_str!("../../templates/include/header.h");

/// Scaffold a binding project: manifest plus a starter header
pub fn execute(lib_name: &str) -> Result<()> {
    validate_lib_name(lib_name)?;

    let project_path = Path::new(lib_name);

    if project_path.exists() {
        anyhow::bail!("Directory '{}' already exists", lib_name);
    }

    fs::create_dir_all(project_path.join("include"))
        .context("Failed to create project directories")?;

    let manifest_content = MANIFEST_TEMPLATE.replace("{{LIB_NAME}}", lib_name);
    fs::write(project_path.join(MANIFEST_FILE), manifest_content)
        .context(format!("Failed to write {}", MANIFEST_FILE))?;

    let header_name = format!("{}.h", lib_name);
    let header_content = HEADER_TEMPLATE.replace("{{LIB_NAME}}", lib_name);
    fs::write(project_path.join("include").join(&header_name), header_content)
        .context(format!("Failed to write include/{}", header_name))?;

    println!(
        "     {} native binding project `{}`",
        "Created".green().bold(),
        lib_name
    );

    Ok(())
}
