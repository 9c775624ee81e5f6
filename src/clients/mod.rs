//! Module with the bundled HBase clients.
//!
//! A client is a description of how to reach one cluster: the zookeeper quorum,
//! the znode parent and the security settings, taken from the [`ClientProperties`](crate::client_properties::ClientProperties).
//! There is one client type per flavor, all created by the generic [`HBaseConnector`].
//!
//! The connector optionally probes the quorum, and fails when no quorum member accepts a connection.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
