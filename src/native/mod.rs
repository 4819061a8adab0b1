//! Native binding surface
//!
//! `platform` picks the library identifier at compile time, `library` opens
//! it, and `bindings` exposes the exported functions as safe Rust calls.

pub mod bindings;
pub mod library;
pub mod platform;

pub use bindings::{BinaryFn, CppNative, SymbolTable, SYMBOLS};
pub use library::NativeLibrary;
pub use platform::{LibraryTarget, INTERNAL, LIB_NAME};
