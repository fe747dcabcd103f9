use thiserror::Error;

/// Errors from the bidirectional search core.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("fewer than two coordinates were given")]
    NotEnoughCoordinates,

    #[error("coordinate out of range: lat={lat}, lon={lon}")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    #[error("no path exists between the requested points")]
    Unreachable,

    #[error("search was cancelled")]
    Cancelled,

    #[error("packed path referenced an edge the facade does not have")]
    CorruptPackedPath,
}

crate::impl_err!(RouteError, Route);
