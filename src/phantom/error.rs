/// Errors raised while resolving a coordinate (and optional hint)
/// into a [`crate::model::PhantomNode`].
#[derive(Debug)]
pub enum PhantomError {
    InvalidInput(String),
    Unreachable,
}

impl std::fmt::Display for PhantomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhantomError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            PhantomError::Unreachable => write!(f, "no edge within search radius"),
        }
    }
}

impl std::error::Error for PhantomError {}

crate::impl_err!(PhantomError, Phantom);
