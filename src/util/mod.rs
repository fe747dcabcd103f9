//! Small cross-cutting helpers: the `impl_err!` macro that wires each
//! submodule's error enum into the crate-level [`crate::Error`], and
//! the optional `tracing` subscriber bootstrap.

#[doc(hidden)]
pub mod err;
#[cfg(feature = "tracing")]
pub mod trace;

pub(crate) use err::err_macro::impl_err;
