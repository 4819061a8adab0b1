pub mod csharp;
pub mod rust_extern;

pub use csharp::generate_csharp_class;
pub use rust_extern::{generate_rust_bindings, validate_rust_bindings};

use anyhow::{bail, Result};

/// Output languages the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    CSharp,
    Rust,
}

impl Language {
    pub fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "csharp" | "c#" | "cs" => Ok(Language::CSharp),
            "rust" | "rs" => Ok(Language::Rust),
            other => bail!("Unknown output language '{}'. Supported: csharp, rust", other),
        }
    }

    /// Output file name for a generated binding
    pub fn output_file_name(&self, class_name: &str, lib_name: &str) -> String {
        match self {
            Language::CSharp => format!("{}.cs", class_name),
            Language::Rust => format!("{}_bindings.rs", lib_name),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::CSharp => write!(f, "csharp"),
            Language::Rust => write!(f, "rust"),
        }
    }
}
