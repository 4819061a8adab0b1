//! Demo native library
//!
//! Exports the four functions declared in `include/mylib.h` with C linkage.
//! Callers load it as `mylib.dll`, `libmylib.so` or `libmylib.dylib`, or link
//! the static archive directly on targets without dynamic loading.

use std::os::raw::c_int;

/// Add two integers together
#[no_mangle]
pub extern "C" fn add(a: c_int, b: c_int) -> c_int {
    a.wrapping_add(b)
}

/// Subtract two integers
#[no_mangle]
pub extern "C" fn subtract(a: c_int, b: c_int) -> c_int {
    a.wrapping_sub(b)
}

/// Multiply two integers
#[no_mangle]
pub extern "C" fn multiply(a: c_int, b: c_int) -> c_int {
    a.wrapping_mul(b)
}

/// Divide two integers, truncating toward zero.
///
/// A zero divisor yields 0. `i32::MIN / -1` wraps to `i32::MIN`.
#[no_mangle]
pub extern "C" fn divide(a: c_int, b: c_int) -> c_int {
    if b == 0 {
        return 0;
    }
    a.wrapping_div(b)
}
