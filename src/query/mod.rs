//! The bidirectional Contraction-Hierarchy search core (spec.md §4.3):
//! query heaps, the stall-on-demand relaxation step, and multi-leg
//! composition.

pub mod engine_data;
pub mod error;
pub mod heap;
pub mod search;
pub mod step;

pub use engine_data::SearchEngineData;
pub use error::RouteError;
pub use heap::QueryHeap;
pub use search::{retrieve_packed_path, shortest_path, SearchResult};
pub(crate) use search::primary_bidirectional_search;
