pub mod c_header;
pub mod comment;

pub use c_header::{
    parse_header_file, parse_header_from_string, CType, HeaderFunction, DEFAULT_EXPORT_MACRO,
};
pub use comment::CommentBlock;

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find all C/C++ headers under `dir`, sorted for stable output
pub fn discover_headers(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Header directory not found: {}", dir.display());
    }

    let mut headers = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.context(format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();

        let is_header = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("h") | Some("hpp") | Some("hh")
        );
        if entry.file_type().is_file() && is_header {
            headers.push(path.to_path_buf());
        }
    }

    headers.sort();
    Ok(headers)
}

/// Parse several headers into one function list, in file order
///
/// A name declared in two places is an error: both would bind to the same
/// symbol.
pub fn parse_headers(paths: &[PathBuf], export_macro: &str) -> Result<Vec<HeaderFunction>> {
    let mut functions: Vec<HeaderFunction> = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for path in paths {
        for function in parse_header_file(path, export_macro)? {
            if let Some(previous) = seen.get(&function.name) {
                bail!(
                    "Function '{}' is declared in both {} and {}",
                    function.name,
                    previous.display(),
                    function.source_file.display()
                );
            }
            seen.insert(function.name.clone(), function.source_file.clone());
            functions.push(function);
        }
    }

    Ok(functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_headers() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("include/nested")).unwrap();
        fs::write(temp_dir.path().join("include/b.h"), "").unwrap();
        fs::write(temp_dir.path().join("include/nested/a.hpp"), "").unwrap();
        fs::write(temp_dir.path().join("include/impl.cpp"), "").unwrap();

        let headers = discover_headers(&temp_dir.path().join("include")).unwrap();

        assert_eq!(headers.len(), 2);
        assert!(headers[0].ends_with("b.h"));
        assert!(headers[1].ends_with("nested/a.hpp"));
    }

    #[test]
    fn test_discover_headers_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(discover_headers(&temp_dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_parse_headers_rejects_duplicates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let first = temp_dir.path().join("first.h");
        let second = temp_dir.path().join("second.h");
        fs::write(&first, "EXTERN_C_API int add(int a, int b);").unwrap();
        fs::write(&second, "EXTERN_C_API int add(int x, int y);").unwrap();

        let err = parse_headers(&[first, second], DEFAULT_EXPORT_MACRO).unwrap_err();
        assert!(err.to_string().contains("Function 'add' is declared in both"));
    }

    #[test]
    fn test_parse_headers_keeps_file_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let first = temp_dir.path().join("first.h");
        let second = temp_dir.path().join("second.h");
        fs::write(&first, "EXTERN_C_API int multiply(int a, int b);").unwrap();
        fs::write(&second, "EXTERN_C_API int add(int a, int b);").unwrap();

        let functions = parse_headers(&[first, second], DEFAULT_EXPORT_MACRO).unwrap();
        let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["multiply", "add"]);
    }
}
