//! The structs
//!
use std::{collections::BTreeMap, sync::{Arc, Mutex}};
use thiserror::Error;
use crate::client_properties::ClientProperties;
use crate::clients::{HBaseAdminClient, HBaseClient, HBaseConnector, HBaseSqlClient};
use crate::properties::PropertySource;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClientFlavor {
    General,
    Admin,
    Sql,
}

/// Creates the client of one flavor for a cluster.
pub trait ClientConnector: Send + Sync {
    type Client: Send + Sync;
    fn connect(&self, alias: &str, clientproperties: &ClientProperties) -> anyhow::Result<Self::Client>;
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cluster {alias} is not configured, cannot obtain the {flavor} client")]
    ClusterNotFound {
        flavor: ClientFlavor,
        alias: String,
    },
    #[error("creating the {flavor} client for cluster {alias} failed")]
    ClientConstruction {
        flavor: ClientFlavor,
        alias: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("the registry is closed, cannot obtain the {flavor} client")]
    Closed {
        flavor: ClientFlavor,
    },
    #[error("a process wide registry is already installed")]
    AlreadyInstalled,
}

/// The mutable state of one flavor, protected by the flavor lock.
pub struct CacheState<T> {
    pub clients: BTreeMap<String, Arc<T>>,
    /// Set after a population pass that created a client for every alias.
    pub populated: bool,
    pub closed: bool,
}

/// The cache and connector of one client flavor.
pub struct FlavorCache<C: ClientConnector> {
    pub flavor: ClientFlavor,
    pub connector: C,
    pub state: Mutex<CacheState<C::Client>>,
}

/// The registry, holding a cache per flavor.
pub struct ClientRegistry<G: ClientConnector, A: ClientConnector, S: ClientConnector> {
    pub source: Box<dyn PropertySource>,
    pub general: FlavorCache<G>,
    pub admin: FlavorCache<A>,
    pub sql: FlavorCache<S>,
}

/// The registry with the bundled clients.
pub type DefaultRegistry = ClientRegistry<HBaseConnector<HBaseClient>, HBaseConnector<HBaseAdminClient>, HBaseConnector<HBaseSqlClient>>;
