use anyhow::{Context, Result};
use std::collections::BTreeSet;

use crate::ffi_parser::{CType, CommentBlock, HeaderFunction};
use crate::native::LibraryTarget;

/// Generate a Rust `extern "C"` module for `functions`
///
/// Dynamic targets link `lib_name` as a shared library; every other target
/// links it statically, mirroring the `__Internal` fallback.
pub fn generate_rust_bindings(
    functions: &[HeaderFunction],
    lib_name: &str,
    source_names: &[String],
) -> String {
    let mut output = String::new();

    output.push_str(&format!("//! Native bindings for `{}`.\n", lib_name));
    output.push_str("//!\n");
    if source_names.is_empty() {
        output.push_str("//! Generated by unibind. Do not edit by hand.\n");
    } else {
        output.push_str(&format!(
            "//! Generated by unibind from {}. Do not edit by hand.\n",
            source_names.join(", ")
        ));
    }
    output.push('\n');

    let raw_types = raw_types_used(functions);
    if !raw_types.is_empty() {
        let list: Vec<&str> = raw_types.into_iter().collect();
        output.push_str(&format!("use std::os::raw::{{{}}};\n\n", list.join(", ")));
    }

    let dynamic: Vec<String> = LibraryTarget::ALL
        .iter()
        .filter_map(|t| t.target_os())
        .map(|os| format!("target_os = \"{}\"", os))
        .collect();
    let dynamic = dynamic.join(", ");

    output.push_str(&format!(
        "#[cfg_attr(any({}), link(name = \"{}\"))]\n",
        dynamic, lib_name
    ));
    output.push_str(&format!(
        "#[cfg_attr(not(any({})), link(name = \"{}\", kind = \"static\"))]\n",
        dynamic, lib_name
    ));
    output.push_str("extern \"C\" {\n");

    for (i, function) in functions.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&generate_declaration(function));
    }

    output.push_str("}\n");
    output
}

/// Check that generated bindings are valid Rust
pub fn validate_rust_bindings(code: &str) -> Result<()> {
    syn::parse_file(code).context("Generated Rust bindings failed to parse")?;
    Ok(())
}

fn generate_declaration(function: &HeaderFunction) -> String {
    let mut output = String::new();

    if let Some(comment) = &function.comment {
        output.push_str(&generate_doc_comment(comment));
    }

    let params: Vec<String> = function
        .params
        .iter()
        .map(|(name, ty)| format!("{}: {}", rust_ident(name), ty.to_rust_type()))
        .collect();

    let ret = match function.return_type {
        CType::Void => String::new(),
        other => format!(" -> {}", other.to_rust_type()),
    };

    output.push_str(&format!(
        "    pub fn {}({}){};\n",
        rust_ident(&function.name),
        params.join(", "),
        ret
    ));

    output
}

fn generate_doc_comment(comment: &CommentBlock) -> String {
    let mut lines: Vec<String> = if comment.summary.is_empty() {
        Vec::new()
    } else {
        comment.summary.split('\n').map(str::to_string).collect()
    };

    if !comment.params.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        for (name, desc) in &comment.params {
            if desc.is_empty() {
                lines.push(format!("* `{}`", name));
            } else {
                lines.push(format!("* `{}` - {}", name, desc));
            }
        }
    }

    if let Some(returns) = comment.returns.as_deref().filter(|r| !r.is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("Returns: {}", returns));
    }

    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                "    ///\n".to_string()
            } else {
                format!("    /// {}\n", line)
            }
        })
        .collect()
}

/// `std::os::raw` names referenced by the declarations
fn raw_types_used(functions: &[HeaderFunction]) -> BTreeSet<&'static str> {
    let types = functions
        .iter()
        .flat_map(|f| f.params.iter().map(|(_, ty)| *ty).chain(std::iter::once(f.return_type)));

    types
        .filter_map(|ty| match ty {
            CType::Void => None,
            CType::Int | CType::IntPtr => Some("c_int"),
            CType::Float | CType::FloatPtr => Some("c_float"),
            CType::Double | CType::DoublePtr => Some("c_double"),
            CType::Char | CType::String | CType::CharPtr => Some("c_char"),
            CType::VoidPtr => Some("c_void"),
        })
        .collect()
}

/// Escape C names that are Rust keywords
fn rust_ident(name: &str) -> String {
    const KEYWORDS: &[&str] = &[
        "as", "async", "await", "box", "break", "const", "continue", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "static", "struct", "trait", "true", "false", "type", "unsafe",
        "use", "where", "while", "yield", "abstract", "become", "do", "final", "macro",
        "override", "priv", "typeof", "unsized", "virtual", "gen", "try",
    ];

    // Path keywords can't be raw identifiers
    const PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

    if PATH_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else if KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn function(
        name: &str,
        params: &[(&str, CType)],
        ret: CType,
        comment: Option<CommentBlock>,
    ) -> HeaderFunction {
        HeaderFunction {
            name: name.to_string(),
            params: params.iter().map(|(n, t)| (n.to_string(), *t)).collect(),
            return_type: ret,
            comment,
            source_file: PathBuf::from("test.h"),
        }
    }

    #[test]
    fn test_generates_link_policy() {
        let add = function("add", &[("a", CType::Int), ("b", CType::Int)], CType::Int, None);
        let code = generate_rust_bindings(&[add], "mylib", &["mylib.h".to_string()]);

        assert!(code.contains("//! Generated by unibind from mylib.h."));
        assert!(code.contains("use std::os::raw::{c_int};"));
        assert!(code.contains(
            "#[cfg_attr(any(target_os = \"windows\", target_os = \"linux\", target_os = \"macos\"), link(name = \"mylib\"))]"
        ));
        assert!(code.contains("link(name = \"mylib\", kind = \"static\")"));
        assert!(code.contains("    pub fn add(a: c_int, b: c_int) -> c_int;\n"));
        validate_rust_bindings(&code).unwrap();
    }

    #[test]
    fn test_void_return_and_keyword_params() {
        let set = function(
            "set_type",
            &[("type", CType::Int), ("data", CType::VoidPtr)],
            CType::Void,
            None,
        );
        let code = generate_rust_bindings(&[set], "demo", &[]);

        assert!(code.contains("    pub fn set_type(r#type: c_int, data: *mut c_void);\n"));
        assert!(code.contains("use std::os::raw::{c_int, c_void};"));
        validate_rust_bindings(&code).unwrap();
    }

    #[test]
    fn test_path_keywords_are_renamed() {
        let update = function(
            "update",
            &[("self", CType::VoidPtr), ("super", CType::Int), ("crate", CType::Int)],
            CType::Void,
            None,
        );
        let code = generate_rust_bindings(&[update], "demo", &[]);

        assert!(code.contains(
            "    pub fn update(self_: *mut c_void, super_: c_int, crate_: c_int);\n"
        ));
        assert_eq!(rust_ident("Self"), "Self_");
        assert_eq!(rust_ident("type"), "r#type");
        validate_rust_bindings(&code).unwrap();
    }

    #[test]
    fn test_doc_comment_rendering() {
        let comment = CommentBlock {
            summary: "Add two integers together".to_string(),
            params: vec![
                ("a".to_string(), "First integer".to_string()),
                ("b".to_string(), String::new()),
            ],
            returns: Some("The sum".to_string()),
        };

        assert_eq!(
            generate_doc_comment(&comment),
            "    /// Add two integers together\n    ///\n    /// * `a` - First integer\n    /// * `b`\n    ///\n    /// Returns: The sum\n"
        );
    }

    #[test]
    fn test_no_functions_still_parses() {
        let code = generate_rust_bindings(&[], "empty", &[]);
        assert!(!code.contains("use std::os::raw"));
        validate_rust_bindings(&code).unwrap();
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert!(validate_rust_bindings("extern \"C\" { pub fn (; }").is_err());
    }
}
