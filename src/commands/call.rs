use anyhow::{bail, Result};

use crate::native::{CppNative, SYMBOLS};

/// Load the native library and call one of its exported functions
pub fn execute(function: &str, a: i32, b: i32, lib: Option<&str>) -> Result<()> {
    if !SYMBOLS.contains(&function) {
        bail!(
            "Unknown function '{}'. Exported functions: {}",
            function,
            SYMBOLS.join(", ")
        );
    }

    let native = match lib {
        Some(path) => CppNative::open(path)?,
        None => CppNative::load()?,
    };

    // Checked against SYMBOLS above
    if let Some(result) = native.call(function, a, b) {
        println!("{}", result);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_function() {
        let err = execute("modulo", 1, 2, None).unwrap_err();
        assert!(err.to_string().contains("Unknown function 'modulo'"));
    }

    #[test]
    fn test_missing_library() {
        let err = execute("add", 1, 2, Some("/nonexistent/libmylib.so")).unwrap_err();
        assert!(err.to_string().contains("Failed to load native library"));
    }
}
