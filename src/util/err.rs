/// Converts an error from one of the submodules into a `corex::Error`
/// variant.
///
/// ```rust,ignore
/// use corex::geo::GeoError;
/// corex::impl_err!(GeoError, Geo);
/// ```
pub mod err_macro {
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            use $crate::Error;

            impl From<$from> for Error {
                fn from(value: $from) -> Self {
                    Error::$variant(value)
                }
            }
        };
    }

    pub(crate) use impl_err;
}
