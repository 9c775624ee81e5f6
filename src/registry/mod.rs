//! Module holding the client registry.
//!
//! The registry keeps one cache per client flavor, keyed by cluster alias.
//! The first request for a flavor creates the clients for all clusters known at that moment,
//! every request after that is served from the cache.
//! A cluster that is added to the configuration after that first request is not seen by the flavor,
//! until the registry is created again.
//!
//! Every flavor has its own lock, so a slow client creation for one flavor does not block the others.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
