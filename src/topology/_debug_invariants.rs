#![allow(dead_code)]

/// Structural corruption is never recoverable: the walk that finds it stops
/// the program instead of handing broken topology to the caller.
macro_rules! corrupted {
    ($($arg:tt)*) => {
        panic!("[corrupted mesh] {}", format_args!($($arg)*))
    };
}
pub(crate) use corrupted;

/// `inv_assert*` fire in debug builds and whenever the `strict-invariants`
/// feature is enabled; they compile to no-ops otherwise.
#[cfg(any(debug_assertions, feature = "strict-invariants"))]
macro_rules! inv_assert {
    ($($tt:tt)*) => { assert!($($tt)*); };
}
#[cfg(not(any(debug_assertions, feature = "strict-invariants")))]
macro_rules! inv_assert {
    ($($tt:tt)*) => {
        ()
    };
}
pub(crate) use inv_assert;
