//! The `CppNative` binding surface.
//!
//! Four integer entry points, each forwarding to the same-named C symbol in
//! the native library. Symbols are resolved once, when the surface is built,
//! so a missing library or symbol fails at load time rather than mid-call.
//! Arguments and results pass through untouched: division by zero and
//! overflow behave however the native library defines them.

use anyhow::{Context, Result};
use std::path::Path;

use super::library::NativeLibrary;
use super::platform::{INTERNAL, LIB_NAME};

/// C signature shared by every exported function: `int f(int a, int b)`
pub type BinaryFn = unsafe extern "C" fn(i32, i32) -> i32;

/// Exported symbol names, in declaration order
pub const SYMBOLS: [&str; 4] = ["add", "subtract", "multiply", "divide"];

/// Resolved function pointers for the four exported symbols
#[derive(Debug, Clone, Copy)]
pub struct SymbolTable {
    pub add: BinaryFn,
    pub subtract: BinaryFn,
    pub multiply: BinaryFn,
    pub divide: BinaryFn,
}

impl SymbolTable {
    /// Resolve all four symbols from `library`
    ///
    /// # Safety
    ///
    /// The library's symbols must really have the `int(int, int)` signature,
    /// and the table must not be used after `library` is dropped.
    pub unsafe fn resolve(library: &NativeLibrary) -> Result<Self> {
        Ok(Self {
            add: library.symbol("add")?,
            subtract: library.symbol("subtract")?,
            multiply: library.symbol("multiply")?,
            divide: library.symbol("divide")?,
        })
    }
}

/// Native arithmetic library binding
#[derive(Debug)]
pub struct CppNative {
    symbols: SymbolTable,
    // Keeps the resolved symbols mapped; `None` when they were linked in.
    library: Option<NativeLibrary>,
}

impl CppNative {
    /// Load the library selected for this build target (`LIB_NAME`)
    pub fn load() -> Result<Self> {
        Self::from_library(open_lib_name(None)?)
    }

    /// Load `LIB_NAME` from `dir` instead of the loader's search path
    ///
    /// On `__Internal` targets the directory is ignored and the process's own
    /// symbols are used, exactly as [`CppNative::load`] does.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_library(open_lib_name(Some(dir.as_ref()))?)
    }

    /// Load the library from an explicit file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let library = NativeLibrary::open(path)?;
        Self::from_library(library)
    }

    /// Bind to an already opened library
    pub fn from_library(library: NativeLibrary) -> Result<Self> {
        // The table is stored next to the library that owns it.
        let symbols = unsafe { SymbolTable::resolve(&library) }
            .with_context(|| format!("Failed to bind native library '{}'", library.origin()))?;

        Ok(Self {
            symbols,
            library: Some(library),
        })
    }

    /// Bind to functions that are already linked into this binary
    pub fn from_symbols(symbols: SymbolTable) -> Self {
        Self {
            symbols,
            library: None,
        }
    }

    /// Add two integers together
    pub fn add(&self, a: i32, b: i32) -> i32 {
        unsafe { (self.symbols.add)(a, b) }
    }

    /// Subtract `b` from `a`
    pub fn subtract(&self, a: i32, b: i32) -> i32 {
        unsafe { (self.symbols.subtract)(a, b) }
    }

    /// Multiply two integers
    pub fn multiply(&self, a: i32, b: i32) -> i32 {
        unsafe { (self.symbols.multiply)(a, b) }
    }

    /// Divide two integers, truncating toward zero (`7 / 2 == 3`, `-7 / 2 == -3`).
    ///
    /// `b == 0` is passed through; the native library decides what happens.
    pub fn divide(&self, a: i32, b: i32) -> i32 {
        unsafe { (self.symbols.divide)(a, b) }
    }

    /// Call an exported function by symbol name
    pub fn call(&self, name: &str, a: i32, b: i32) -> Option<i32> {
        match name {
            "add" => Some(self.add(a, b)),
            "subtract" => Some(self.subtract(a, b)),
            "multiply" => Some(self.multiply(a, b)),
            "divide" => Some(self.divide(a, b)),
            _ => None,
        }
    }

    /// Where the symbols came from: a library path, `__Internal`, or `None`
    /// when they were supplied directly.
    pub fn origin(&self) -> Option<&str> {
        self.library.as_ref().map(|lib| lib.origin())
    }
}

fn open_lib_name(dir: Option<&Path>) -> Result<NativeLibrary> {
    match dir {
        Some(dir) if LIB_NAME != INTERNAL => NativeLibrary::open(dir.join(LIB_NAME)),
        _ => NativeLibrary::open_identifier(LIB_NAME),
    }
}
