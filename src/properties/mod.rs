//! Module for reading the per-cluster configuration.
//!
//! The cluster configuration is a java style properties file, in which every key
//! is prefixed with the cluster alias:
//!
//! ```text
//! cluster1.hbase.quorum=node1,node2,node3
//! cluster1.hbase.zk.client.port=2181
//! cluster1.hbase.node.parent=/hbase
//! ```
//!
//! The aliases are found by looking for the `.hbase.` marker in the keys.
//!
mod structs;
mod functions;

pub use structs::*;
