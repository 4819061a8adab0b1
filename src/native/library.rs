//! Native library handles and symbol lookup.

use anyhow::{Context, Result};
use libloading::Library;
use std::path::Path;

use super::platform::INTERNAL;

/// A loaded native library, or the current process's symbol table
pub struct NativeLibrary {
    library: Library,
    /// What was opened, for error messages
    origin: String,
}

impl NativeLibrary {
    /// Open a native library file.
    ///
    /// Bare identifiers (`libmylib.so`, `mylib`) go through the platform
    /// loader's search path; paths with directories are opened as given.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Loading runs the library's initializers; there is nothing to check
        // about them from here.
        let library = unsafe { Library::new(path) }
            .with_context(|| format!("Failed to load native library '{}'", path.display()))?;

        Ok(Self {
            library,
            origin: path.display().to_string(),
        })
    }

    /// Open a library by identifier, where `__Internal` means the current process
    pub fn open_identifier(identifier: &str) -> Result<Self> {
        if identifier == INTERNAL {
            Self::this()
        } else {
            Self::open(identifier)
        }
    }

    /// Symbols linked into the current process
    #[cfg(unix)]
    pub fn this() -> Result<Self> {
        let library: Library = libloading::os::unix::Library::this().into();
        Ok(Self {
            library,
            origin: INTERNAL.to_string(),
        })
    }

    /// Symbols linked into the current process
    #[cfg(windows)]
    pub fn this() -> Result<Self> {
        let library: Library = libloading::os::windows::Library::this()
            .context("Failed to open the current process as a library")?
            .into();
        Ok(Self {
            library,
            origin: INTERNAL.to_string(),
        })
    }

    /// Resolve `name` to a value of type `F`, usually a function pointer.
    ///
    /// # Safety
    ///
    /// `F` must match the symbol's real type. The returned value must not
    /// outlive this library.
    pub unsafe fn symbol<F: Copy>(&self, name: &str) -> Result<F> {
        let symbol = self
            .library
            .get::<F>(name.as_bytes())
            .with_context(|| format!("Symbol '{}' not found in '{}'", name, self.origin))?;
        Ok(*symbol)
    }

    /// What this handle was opened from
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("origin", &self.origin)
            .finish()
    }
}
