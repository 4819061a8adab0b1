//! Cross-platform native bindings for game-engine hosts.
//!
//! [`native`] is the binding surface over the `mylib` native library: the
//! library identifier is fixed per build target and the four exported
//! integer functions are resolved once at load time. [`ffi_parser`] and
//! [`ffi_codegen`] read C headers and emit matching Unity `DllImport`
//! classes or Rust `extern "C"` modules.

pub mod commands;
pub mod config;
pub mod ffi_codegen;
pub mod ffi_parser;
pub mod native;
