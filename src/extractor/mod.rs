//! Call-site and route extraction from parsed JS/TS sources.
//!
//! - `frontend`: outbound HTTP calls (`fetch`, axios-style clients)
//! - `backend`: route declarations and mount points (Express-style routers)

pub mod backend;
pub mod frontend;
mod helpers;

pub use backend::{extract_routes, BackendExtraction};
pub use frontend::extract_calls;
pub use helpers::WILDCARD;
