/// Library targets the binding surface can be built for
///
/// Exactly one of these is current for a given build, chosen by
/// `cfg(target_os)`. Anything that isn't Windows, Linux or macOS links the
/// native code statically and resolves symbols from the process itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryTarget {
    Windows,
    Linux,
    MacOs,
    Internal,
}

/// Identifier that stands for the process's own symbol table
pub const INTERNAL: &str = "__Internal";

/// Library identifier for the current build target
#[cfg(target_os = "windows")]
pub const LIB_NAME: &str = "mylib"; // mylib.dll
#[cfg(target_os = "linux")]
pub const LIB_NAME: &str = "libmylib.so";
#[cfg(target_os = "macos")]
pub const LIB_NAME: &str = "libmylib.dylib";
#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
pub const LIB_NAME: &str = INTERNAL; // statically linked (e.g. iOS)

impl LibraryTarget {
    /// All targets, in the order the generated switches list them
    pub const ALL: [LibraryTarget; 4] = [
        LibraryTarget::Windows,
        LibraryTarget::Linux,
        LibraryTarget::MacOs,
        LibraryTarget::Internal,
    ];

    #[cfg(target_os = "windows")]
    pub const CURRENT: LibraryTarget = LibraryTarget::Windows;
    #[cfg(target_os = "linux")]
    pub const CURRENT: LibraryTarget = LibraryTarget::Linux;
    #[cfg(target_os = "macos")]
    pub const CURRENT: LibraryTarget = LibraryTarget::MacOs;
    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    pub const CURRENT: LibraryTarget = LibraryTarget::Internal;

    /// Library identifier for a library base name on this target
    ///
    /// # Example
    /// ```
    /// use unibind::native::LibraryTarget;
    ///
    /// assert_eq!(LibraryTarget::Windows.identifier("mylib"), "mylib");
    /// assert_eq!(LibraryTarget::Linux.identifier("mylib"), "libmylib.so");
    /// assert_eq!(LibraryTarget::Internal.identifier("mylib"), "__Internal");
    /// ```
    pub fn identifier(&self, lib_name: &str) -> String {
        match self {
            LibraryTarget::Windows => lib_name.to_string(),
            LibraryTarget::Linux => format!("lib{}.so", lib_name),
            LibraryTarget::MacOs => format!("lib{}.dylib", lib_name),
            LibraryTarget::Internal => INTERNAL.to_string(),
        }
    }

    /// File name the identifier resolves to on disk, if any
    ///
    /// Windows appends `.dll` to the bare identifier; the internal target has
    /// no file at all.
    pub fn file_name(&self, lib_name: &str) -> Option<String> {
        match self {
            LibraryTarget::Windows => Some(format!("{}.dll", lib_name)),
            LibraryTarget::Linux | LibraryTarget::MacOs => Some(self.identifier(lib_name)),
            LibraryTarget::Internal => None,
        }
    }

    /// Host-side preprocessor symbols that select this target in generated C#
    pub fn unity_defines(&self) -> &'static [&'static str] {
        match self {
            LibraryTarget::Windows => &["UNITY_STANDALONE_WIN", "UNITY_EDITOR_WIN"],
            LibraryTarget::Linux => &["UNITY_STANDALONE_LINUX", "UNITY_EDITOR_LINUX"],
            LibraryTarget::MacOs => &["UNITY_STANDALONE_OSX", "UNITY_EDITOR_OSX"],
            LibraryTarget::Internal => &[],
        }
    }

    /// Rust `target_os` value for this target; `None` for the catch-all
    pub fn target_os(&self) -> Option<&'static str> {
        match self {
            LibraryTarget::Windows => Some("windows"),
            LibraryTarget::Linux => Some("linux"),
            LibraryTarget::MacOs => Some("macos"),
            LibraryTarget::Internal => None,
        }
    }

    pub fn is_current(&self) -> bool {
        *self == Self::CURRENT
    }
}

impl std::fmt::Display for LibraryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LibraryTarget::Windows => "windows",
            LibraryTarget::Linux => "linux",
            LibraryTarget::MacOs => "macos",
            LibraryTarget::Internal => "internal",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lib_name_matches_current_target() {
        assert_eq!(LibraryTarget::CURRENT.identifier("mylib"), LIB_NAME);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(LibraryTarget::Windows.identifier("mylib"), "mylib");
        assert_eq!(LibraryTarget::Linux.identifier("mylib"), "libmylib.so");
        assert_eq!(LibraryTarget::MacOs.identifier("mylib"), "libmylib.dylib");
        assert_eq!(LibraryTarget::Internal.identifier("mylib"), "__Internal");
    }

    #[test]
    fn test_identifier_is_deterministic() {
        for target in LibraryTarget::ALL {
            assert_eq!(target.identifier("mylib"), target.identifier("mylib"));
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(LibraryTarget::Windows.file_name("mylib").as_deref(), Some("mylib.dll"));
        assert_eq!(LibraryTarget::Linux.file_name("mylib").as_deref(), Some("libmylib.so"));
        assert_eq!(LibraryTarget::MacOs.file_name("mylib").as_deref(), Some("libmylib.dylib"));
        assert_eq!(LibraryTarget::Internal.file_name("mylib"), None);
    }

    #[test]
    fn test_exactly_one_current() {
        let current: Vec<_> = LibraryTarget::ALL.iter().filter(|t| t.is_current()).collect();
        assert_eq!(current.len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(LibraryTarget::MacOs.to_string(), "macos");
        assert_eq!(LibraryTarget::Internal.to_string(), "internal");
    }
}
