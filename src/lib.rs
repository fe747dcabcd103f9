#![allow(dead_code)]

//! Contraction-hierarchy route query engine for preprocessed OSM
//! graphs: a read-only [`facade`] over the preprocessed data, a
//! [`phantom`]-node resolver, a bidirectional [`query`] core, an
//! [`alternative`]-path engine, a shortcut [`unpack`] step, a
//! [`description`] pipeline and the [`response`] types they build
//! towards, tied together by [`engine::RouteEngine`].

use crate::facade::FacadeError;
use crate::geo::GeoError;
use crate::phantom::PhantomError;
use crate::query::RouteError;

pub mod alternative;
pub mod config;
pub mod description;
pub mod engine;
pub mod facade;
pub mod geo;
pub mod model;
pub mod phantom;
pub mod query;
pub mod response;
pub mod unpack;
pub mod util;

pub(crate) use util::impl_err;

/// The crate-wide error type, aggregating every submodule's own error
/// enum. Each `From` impl is generated by [`impl_err!`] at the
/// submodule that owns the variant.
#[derive(Debug)]
pub enum Error {
    Facade(FacadeError),
    Phantom(PhantomError),
    Route(RouteError),
    Geo(GeoError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Facade(e) => write!(f, "{e}"),
            Error::Phantom(e) => write!(f, "{e}"),
            Error::Route(e) => write!(f, "{e}"),
            Error::Geo(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
