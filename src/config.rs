use anyhow::Result;
use serde::Deserialize;
use std::fs;

use crate::ffi_codegen::Language;
use crate::ffi_parser::DEFAULT_EXPORT_MACRO;

/// Default manifest file name
pub const MANIFEST_FILE: &str = "unibind.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub library: LibraryConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
}

#[derive(Debug, Deserialize)]
pub struct LibraryConfig {
    /// Base name of the native library (`mylib` -> mylib.dll, libmylib.so, ...)
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerateConfig {
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default = "default_output_folder")]
    pub output_folder: String,
    /// Header files, relative to the manifest
    #[serde(default)]
    pub headers: Vec<String>,
    /// Directories searched for `.h`/`.hpp` files, relative to the manifest
    #[serde(default)]
    pub header_dirs: Vec<String>,
    #[serde(default = "default_export_macro")]
    pub export_macro: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            class_name: default_class_name(),
            output_folder: default_output_folder(),
            headers: Vec::new(),
            header_dirs: Vec::new(),
            export_macro: default_export_macro(),
            languages: default_languages(),
        }
    }
}

impl GenerateConfig {
    /// Parsed output languages, deduplicated, in declaration order
    pub fn languages(&self) -> Result<Vec<Language>> {
        let mut languages = Vec::new();
        for name in &self.languages {
            let language = Language::from_str(name)?;
            if !languages.contains(&language) {
                languages.push(language);
            }
        }
        Ok(languages)
    }
}

fn default_class_name() -> String {
    "CppNative".to_string()
}

fn default_output_folder() -> String {
    ".".to_string()
}

fn default_export_macro() -> String {
    DEFAULT_EXPORT_MACRO.to_string()
}

fn default_languages() -> Vec<String> {
    vec!["csharp".to_string()]
}

/// Load and parse a unibind.toml manifest
pub fn load_config(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!("could not find `{}` in current directory", path)
        } else {
            anyhow::anyhow!("failed to read `{}`: {}", path, e)
        }
    })?;

    parse_config(&content).map_err(|e| anyhow::anyhow!("failed to parse `{}`: {}", path, e))
}

/// Parse and validate manifest contents
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;

    validate_lib_name(&config.library.name)?;
    validate_class_name(&config.generate.class_name)?;
    if config.generate.export_macro.trim().is_empty() {
        anyhow::bail!("Export macro must not be empty");
    }
    config.generate.languages()?;

    Ok(config)
}

/// Library base names become C identifiers and file names
pub fn validate_lib_name(name: &str) -> Result<()> {
    if !is_identifier(name) {
        anyhow::bail!(
            "Invalid library name '{}'. Use letters, digits and underscores, not starting with a digit (e.g., 'mylib')",
            name
        );
    }
    Ok(())
}

/// C# class names must be identifiers
pub fn validate_class_name(name: &str) -> Result<()> {
    if !is_identifier(name) {
        anyhow::bail!(
            "Invalid class name '{}'. Must be a C# identifier (e.g., 'CppNative')",
            name
        );
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
