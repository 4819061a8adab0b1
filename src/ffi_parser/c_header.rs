use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use super::comment::{find_comment_block, CommentBlock};

/// Macro marking a declaration as exported from the native library
pub const DEFAULT_EXPORT_MACRO: &str = "EXTERN_C_API";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CType {
    Void,
    Int,
    Float,
    Double,
    Char,
    String,
    CharPtr,
    IntPtr,
    FloatPtr,
    DoublePtr,
    VoidPtr,
}

impl CType {
    /// Parse a C type from a declaration fragment
    ///
    /// Whitespace around `*` is ignored and a leading `const` is dropped,
    /// so `const char *` and `char*` are the same type.
    pub fn from_str(type_str: &str) -> Result<Self> {
        let trimmed = type_str.trim();
        let without_const = trimmed
            .strip_prefix("const")
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .unwrap_or(trimmed);
        let normalized: String = without_const.split_whitespace().collect();

        match normalized.as_str() {
            "void" => Ok(CType::Void),
            "int" | "int32_t" => Ok(CType::Int),
            "float" => Ok(CType::Float),
            "double" => Ok(CType::Double),
            "char" => Ok(CType::Char),
            "string" => Ok(CType::String),
            "char*" => Ok(CType::CharPtr),
            "int*" | "int32_t*" => Ok(CType::IntPtr),
            "float*" => Ok(CType::FloatPtr),
            "double*" => Ok(CType::DoublePtr),
            "void*" => Ok(CType::VoidPtr),
            _ => bail!(
                "Unsupported C type: '{}'. Supported: int, float, double, void, char, char*, int*, float*, double*, void*",
                trimmed
            ),
        }
    }

    /// C# type used in `DllImport` declarations
    pub fn to_csharp_type(&self) -> &'static str {
        match self {
            CType::Void => "void",
            CType::Int => "int",
            CType::Float => "float",
            CType::Double => "double",
            CType::Char => "char",
            CType::String | CType::CharPtr => "string",
            CType::IntPtr | CType::FloatPtr | CType::DoublePtr | CType::VoidPtr => "IntPtr",
        }
    }

    /// Rust FFI type, in terms of `std::os::raw`
    pub fn to_rust_type(&self) -> &'static str {
        match self {
            CType::Void => "()",
            CType::Int => "c_int",
            CType::Float => "c_float",
            CType::Double => "c_double",
            CType::Char => "c_char",
            CType::String | CType::CharPtr => "*const c_char",
            CType::IntPtr => "*mut c_int",
            CType::FloatPtr => "*mut c_float",
            CType::DoublePtr => "*mut c_double",
            CType::VoidPtr => "*mut c_void",
        }
    }

    /// Canonical C spelling
    pub fn to_c_type(&self) -> &'static str {
        match self {
            CType::Void => "void",
            CType::Int => "int",
            CType::Float => "float",
            CType::Double => "double",
            CType::Char => "char",
            CType::String => "string",
            CType::CharPtr => "char*",
            CType::IntPtr => "int*",
            CType::FloatPtr => "float*",
            CType::DoublePtr => "double*",
            CType::VoidPtr => "void*",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeaderFunction {
    pub name: String,
    pub params: Vec<(String, CType)>,
    pub return_type: CType,
    pub comment: Option<CommentBlock>,
    pub source_file: PathBuf,
}

impl HeaderFunction {
    /// C prototype, e.g. `int add(int a, int b)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|(name, ty)| format!("{} {}", ty.to_c_type(), name))
            .collect();
        format!("{} {}({})", self.return_type.to_c_type(), self.name, params.join(", "))
    }
}

/// Parse a header file for exported declarations
pub fn parse_header_file(path: &Path, export_macro: &str) -> Result<Vec<HeaderFunction>> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read header: {}", path.display()))?;

    parse_header_from_string(&content, path, export_macro)
}

/// Parse header source for exported declarations (testable)
pub fn parse_header_from_string(
    content: &str,
    source_file: &Path,
    export_macro: &str,
) -> Result<Vec<HeaderFunction>> {
    // <macro> <type>[ *] <name>(<params>)
    // The return type is one identifier, optionally `const`-qualified, with
    // any number of `*` attached on either side of the whitespace. Any of the
    // separators may be a line break.
    let pattern = format!(
        r"\b{}\s+((?:const\s+)?[A-Za-z_]\w*(?:\s*\*)*)\s*\b(\w+)\s*\(([^)]*)\)",
        regex::escape(export_macro)
    );
    let decl_regex = Regex::new(&pattern)
        .context(format!("Invalid export macro '{}'", export_macro))?;

    let mut functions = Vec::new();

    for cap in decl_regex.captures_iter(content) {
        let (Some(whole), Some(ret), Some(name), Some(params)) =
            (cap.get(0), cap.get(1), cap.get(2), cap.get(3))
        else {
            continue;
        };
        if is_commented_out(content, whole.start()) || is_preprocessor_line(content, whole.start()) {
            continue;
        }

        let function_name = name.as_str();

        let return_type = CType::from_str(ret.as_str())
            .context(format!("In function '{}' at {}", function_name, source_file.display()))?;

        let params = parse_parameters(params.as_str(), function_name, source_file)?;

        functions.push(HeaderFunction {
            name: function_name.to_string(),
            params,
            return_type,
            comment: find_comment_block(content, whole.start()),
            source_file: source_file.to_path_buf(),
        });
    }

    Ok(functions)
}

/// Whether `pos` sits after a `//` on its line or inside an open `/* */` block
fn is_commented_out(content: &str, pos: usize) -> bool {
    let before = &content[..pos];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    if before[line_start..].contains("//") {
        return true;
    }

    match (before.rfind("/*"), before.rfind("*/")) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

/// `#define EXTERN_C_API ...` and friends
fn is_preprocessor_line(content: &str, pos: usize) -> bool {
    let before = &content[..pos];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    before[line_start..].trim_start().starts_with('#')
}

/// Parse parameter list: "int a, float *b" -> [("a", Int), ("b", FloatPtr)]
fn parse_parameters(
    params_str: &str,
    function_name: &str,
    source_file: &Path,
) -> Result<Vec<(String, CType)>> {
    let params_str = params_str.trim();
    if params_str.is_empty() || params_str == "void" {
        return Ok(Vec::new());
    }

    let mut params = Vec::new();

    for param in params_str.split(',') {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }

        // The name is the trailing identifier; everything before it, `*`
        // included, is the type.
        let name_start = param
            .char_indices()
            .rev()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        let (param_type_str, param_name) = param.split_at(name_start);

        if param_type_str.trim().is_empty() || param_name.is_empty() {
            bail!(
                "Invalid parameter '{}' in function '{}' at {}. Expected format: 'type name'",
                param,
                function_name,
                source_file.display()
            );
        }

        let param_type = CType::from_str(param_type_str).context(format!(
            "In parameter '{}' of function '{}' at {}",
            param_name,
            function_name,
            source_file.display()
        ))?;

        params.push((param_name.to_string(), param_type));
    }

    Ok(params)
}
