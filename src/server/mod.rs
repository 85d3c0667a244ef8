/// HTTP server implementation for the Profile Store.
///
/// This module provides the [`ApiServer`] which binds a listener and serves
/// the JSON API, and [`routes`] which builds the router on its own for
/// in-process use.
pub mod router;

pub use router::{routes, ApiServer, SharedStore};
