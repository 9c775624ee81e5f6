//! A registry of HBase clients for multiple clusters.
//!
//! Every cluster is configured under its own alias in a properties file.
//! The registry creates a client per cluster and per flavor (general, admin, sql) on first use,
//! and hands out the same client for every request after that.
//!
//! ```text
//! let registry = DefaultRegistry::with_source(ClusterProperties::from_file(Path::new("hbase.properties"))?);
//! let admin = registry.get_admin_client("cluster1")?;
//! ```
#[macro_use]
extern crate serde_derive;

pub mod properties;
pub mod client_properties;
pub mod clients;
pub mod registry;
pub mod utility;

pub use properties::{ClusterProperties, PropertySource};
pub use client_properties::ClientProperties;
pub use registry::{ClientConnector, ClientFlavor, ClientRegistry, DefaultRegistry, RegistryError};
