//! Module for assembling the client properties of a single cluster.
//!
//! The per cluster keys (`<alias>.hbase.<suffix>`) are translated to the canonical
//! HBase client keys, such as `hbase.zookeeper.quorum`.
//! The free form `<alias>.hbase.client.properties` block is merged last,
//! so it can override any canonical key.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
