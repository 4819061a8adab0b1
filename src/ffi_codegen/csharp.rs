use crate::ffi_parser::{CommentBlock, HeaderFunction};
use crate::native::LibraryTarget;

/// Generate a Unity `DllImport` class for `functions`
///
/// The class resolves its library through `LIB_NAME`, which the engine's
/// preprocessor picks per standalone/editor platform, falling back to
/// `__Internal` for statically linked players.
pub fn generate_csharp_class(
    functions: &[HeaderFunction],
    class_name: &str,
    lib_name: &str,
) -> String {
    let mut output = String::new();

    output.push_str("using System.Runtime.InteropServices;\n");
    if needs_system_import(functions) {
        output.push_str("using System;\n");
    }
    output.push('\n');

    output.push_str(&format!("public static class {}\n{{\n", class_name));
    output.push_str(&generate_lib_name_switch(lib_name));
    output.push('\n');

    for function in functions {
        output.push_str(&generate_function(function));
        output.push('\n');
    }

    output.push_str("\n}\n");
    output
}

/// `#if`/`#elif` chain selecting `LIB_NAME` per platform
fn generate_lib_name_switch(lib_name: &str) -> String {
    let mut output = String::new();

    for (i, target) in LibraryTarget::ALL.iter().enumerate() {
        let directive = match (i, target) {
            (_, LibraryTarget::Internal) => "#else".to_string(),
            (0, _) => format!("#if {}", target.unity_defines().join(" || ")),
            _ => format!("#elif {}", target.unity_defines().join(" || ")),
        };
        let note = match target {
            LibraryTarget::Windows => format!("{}.dll", lib_name),
            LibraryTarget::Linux => "Linux".to_string(),
            LibraryTarget::MacOs => "macOS".to_string(),
            LibraryTarget::Internal => "iOS uses static linking".to_string(),
        };

        output.push_str(&directive);
        output.push('\n');
        output.push_str(&format!(
            "    const string LIB_NAME = \"{}\"; // {}\n",
            target.identifier(lib_name),
            note
        ));
    }

    output.push_str("#endif\n");
    output
}

fn generate_function(function: &HeaderFunction) -> String {
    let mut output = String::from("\n");

    if let Some(comment) = &function.comment {
        output.push_str(&generate_doc_comment(comment));
    }

    let params: Vec<String> = function
        .params
        .iter()
        .map(|(name, ty)| format!("{} {}", ty.to_csharp_type(), csharp_ident(name)))
        .collect();

    output.push_str("    [DllImport(LIB_NAME)]\n");
    output.push_str(&format!(
        "    public static extern {} {}({});",
        function.return_type.to_csharp_type(),
        csharp_ident(&function.name),
        params.join(", ")
    ));

    output
}

fn generate_doc_comment(comment: &CommentBlock) -> String {
    let mut output = String::from("    /// <summary>\n");

    for line in comment.summary.split('\n') {
        output.push_str(&format!("    /// {}\n", escape_xml(line)));
    }
    output.push_str("    /// </summary>\n");

    for (name, desc) in &comment.params {
        output.push_str(&format!(
            "    /// <param name=\"{}\">{}</param>\n",
            name,
            escape_xml(desc)
        ));
    }

    if let Some(returns) = comment.returns.as_deref().filter(|r| !r.is_empty()) {
        output.push_str(&format!("    /// <returns>{}</returns>\n", escape_xml(returns)));
    }

    output
}

/// `IntPtr` lives in `System`
fn needs_system_import(functions: &[HeaderFunction]) -> bool {
    functions.iter().any(|f| {
        f.return_type.to_csharp_type() == "IntPtr"
            || f.params.iter().any(|(_, ty)| ty.to_csharp_type() == "IntPtr")
    })
}

/// Escape C names that are C# keywords with the verbatim `@` prefix
fn csharp_ident(name: &str) -> String {
    const KEYWORDS: &[&str] = &[
        "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
        "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
        "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
        "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
        "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
        "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed",
        "short", "sizeof", "stackalloc", "static", "string", "struct", "switch", "this",
        "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort",
        "using", "virtual", "void", "volatile", "while",
    ];

    if KEYWORDS.contains(&name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// XML doc comments choke on bare `<`, `>` and `&`
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi_parser::CType;
    use std::path::PathBuf;

    fn function(name: &str, params: &[(&str, CType)], ret: CType) -> HeaderFunction {
        HeaderFunction {
            name: name.to_string(),
            params: params.iter().map(|(n, t)| (n.to_string(), *t)).collect(),
            return_type: ret,
            comment: None,
            source_file: PathBuf::from("test.h"),
        }
    }

    #[test]
    fn test_lib_name_switch() {
        let switch = generate_lib_name_switch("audio");

        assert!(switch.starts_with("#if UNITY_STANDALONE_WIN || UNITY_EDITOR_WIN\n"));
        assert!(switch.contains("    const string LIB_NAME = \"audio\"; // audio.dll\n"));
        assert!(switch.contains("#elif UNITY_STANDALONE_LINUX || UNITY_EDITOR_LINUX\n"));
        assert!(switch.contains("\"libaudio.so\"; // Linux"));
        assert!(switch.contains("\"libaudio.dylib\"; // macOS"));
        assert!(switch.contains("#else\n    const string LIB_NAME = \"__Internal\";"));
        assert!(switch.ends_with("#endif\n"));
    }

    #[test]
    fn test_function_without_comment() {
        let add = function("add", &[("a", CType::Int), ("b", CType::Int)], CType::Int);
        assert_eq!(
            generate_function(&add),
            "\n    [DllImport(LIB_NAME)]\n    public static extern int add(int a, int b);"
        );
    }

    #[test]
    fn test_keyword_names_are_escaped() {
        let copy = function(
            "copy",
            &[("in", CType::IntPtr), ("out", CType::IntPtr), ("base", CType::Int)],
            CType::Void,
        );
        assert_eq!(
            generate_function(&copy),
            "\n    [DllImport(LIB_NAME)]\n    public static extern void copy(IntPtr @in, IntPtr @out, int @base);"
        );

        assert_eq!(csharp_ident("lock"), "@lock");
        assert_eq!(csharp_ident("value"), "value");
    }

    #[test]
    fn test_doc_comment() {
        let comment = CommentBlock {
            summary: "Clamp a value\nto a < b".to_string(),
            params: vec![("x".to_string(), "Value".to_string())],
            returns: Some("Clamped value".to_string()),
        };

        assert_eq!(
            generate_doc_comment(&comment),
            "    /// <summary>\n    /// Clamp a value\n    /// to a &lt; b\n    /// </summary>\n    /// <param name=\"x\">Value</param>\n    /// <returns>Clamped value</returns>\n"
        );
    }

    #[test]
    fn test_pointer_types_import_system() {
        let fill = function("fill", &[("values", CType::IntPtr)], CType::Void);
        let greet = function("greet", &[("name", CType::CharPtr)], CType::CharPtr);

        let with_ptr = generate_csharp_class(&[fill], "Native", "demo");
        assert!(with_ptr.contains("using System;\n"));
        assert!(with_ptr.contains("public static extern void fill(IntPtr values);"));

        let strings_only = generate_csharp_class(&[greet], "Native", "demo");
        assert!(!strings_only.contains("using System;\n"));
        assert!(strings_only.contains("public static extern string greet(string name);"));
    }
}
