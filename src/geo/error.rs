#[derive(Debug)]
pub enum GeoError {
    InvalidCoordinate(String),
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::InvalidCoordinate(msg) => write!(f, "invalid coordinate: {msg}"),
        }
    }
}

impl std::error::Error for GeoError {}

crate::impl_err!(GeoError, Geo);
