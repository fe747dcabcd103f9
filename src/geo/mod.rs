//! Fixed-point geographic coordinates and the distance/bearing
//! helpers the description pipeline and phantom-node resolver share.
//!
//! Coordinates are kept as fixed-point integers (factor 10^6) end to
//! end, the way the upstream engine this crate's query core is
//! modelled on does it, so that repeated arithmetic over a route
//! never drifts from floating point rounding.

#[doc(hidden)]
pub mod error;
pub mod fixed;
pub mod distance;

#[doc(inline)]
pub use fixed::FixedPointCoordinate;
#[doc(inline)]
pub use error::GeoError;
