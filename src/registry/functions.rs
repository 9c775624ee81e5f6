//! The impls and functions
//!
use std::{env, fmt, path::Path, sync::{Arc, MutexGuard, OnceLock, PoisonError}, time::{Duration, Instant}};
use log::*;
use crate::client_properties::ClientProperties;
use crate::clients::HBaseConnector;
use crate::properties::{ClusterProperties, PropertySource};
use crate::registry::{CacheState, ClientConnector, ClientFlavor, ClientRegistry, DefaultRegistry, FlavorCache, RegistryError};

/// The environment variable naming the properties file of the process wide registry.
pub const PROPERTIES_FILE_VARIABLE: &str = "HBASE_REGISTRY_PROPERTIES";
pub const DEFAULT_PROPERTIES_FILE: &str = "hbase.properties";

static REGISTRY: OnceLock<DefaultRegistry> = OnceLock::new();

impl fmt::Display for ClientFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientFlavor::General => write!(f, "general"),
            ClientFlavor::Admin => write!(f, "admin"),
            ClientFlavor::Sql => write!(f, "sql"),
        }
    }
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        CacheState { clients: Default::default(), populated: false, closed: false }
    }
}

impl<C: ClientConnector> FlavorCache<C> {
    pub fn new(
        flavor: ClientFlavor,
        connector: C,
    ) -> Self
    {
        FlavorCache { flavor, connector, state: Default::default() }
    }
    // A connector that panicked leaves the state as it was at the moment of the panic,
    // which is the same state a failed connect leaves behind.
    fn lock(&self) -> MutexGuard<'_, CacheState<C::Client>>
    {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
    /// Return the client for `alias`, creating the clients for all clusters if this flavor is not populated yet.
    ///
    /// The flavor lock is held for the entire call, including the population.
    pub fn get(
        &self,
        source: &dyn PropertySource,
        alias: &str,
    ) -> Result<Arc<C::Client>, RegistryError>
    {
        info!("obtaining the {} client for cluster: {}", self.flavor, alias);
        let mut state = self.lock();

        if state.closed {
            return Err(RegistryError::Closed { flavor: self.flavor });
        }
        if let Some(client) = state.clients.get(alias) {
            return Ok(client.clone());
        }
        if !state.populated || state.clients.is_empty() {
            self.populate(source, &mut state)?;
        }
        state.clients.get(alias)
            .cloned()
            .ok_or_else(|| RegistryError::ClusterNotFound { flavor: self.flavor, alias: alias.to_string() })
    }
    /// Create a client for every alias of the source that is not cached yet.
    ///
    /// The first failing alias stops the pass, the clients created before it stay cached.
    fn populate(
        &self,
        source: &dyn PropertySource,
        state: &mut CacheState<C::Client>,
    ) -> Result<(), RegistryError>
    {
        info!("begin population of {} clients", self.flavor);
        let timer = Instant::now();

        for alias in source.cluster_aliases() {
            if state.clients.contains_key(&alias) {
                debug!("{} client for cluster {} already cached", self.flavor, alias);
                continue;
            }
            let clientproperties = ClientProperties::build(source, &alias);
            let client = self.connector.connect(&alias, &clientproperties)
                .map_err(|e| {
                    error!("creating the {} client for cluster {} failed: {:#}", self.flavor, alias, e);
                    RegistryError::ClientConstruction { flavor: self.flavor, alias: alias.clone(), source: e.into() }
                })?;
            state.clients.insert(alias, Arc::new(client));
        }
        state.populated = true;

        info!("end population of {} clients: {} cached, {:?}", self.flavor, state.clients.len(), timer.elapsed());
        Ok(())
    }
    pub fn cached_aliases(&self) -> Vec<String>
    {
        self.lock().clients.keys().cloned().collect()
    }
    /// Drop all cached clients; every request after this fails.
    pub fn close(&self)
    {
        let mut state = self.lock();
        info!("closing {} clients: {} cached", self.flavor, state.clients.len());
        state.clients.clear();
        state.closed = true;
    }
}

impl<G: ClientConnector, A: ClientConnector, S: ClientConnector> ClientRegistry<G, A, S> {
    /// Create a registry. No clients are created here, that happens on the first request per flavor.
    pub fn new(
        source: impl PropertySource + 'static,
        general: G,
        admin: A,
        sql: S,
    ) -> Self
    {
        ClientRegistry {
            source: Box::new(source),
            general: FlavorCache::new(ClientFlavor::General, general),
            admin: FlavorCache::new(ClientFlavor::Admin, admin),
            sql: FlavorCache::new(ClientFlavor::Sql, sql),
        }
    }
    pub fn get_client(
        &self,
        alias: &str,
    ) -> Result<Arc<G::Client>, RegistryError>
    {
        self.general.get(self.source.as_ref(), alias)
    }
    pub fn get_admin_client(
        &self,
        alias: &str,
    ) -> Result<Arc<A::Client>, RegistryError>
    {
        self.admin.get(self.source.as_ref(), alias)
    }
    pub fn get_sql_client(
        &self,
        alias: &str,
    ) -> Result<Arc<S::Client>, RegistryError>
    {
        self.sql.get(self.source.as_ref(), alias)
    }
    /// The aliases currently known to the configuration source.
    pub fn cluster_aliases(&self) -> Vec<String>
    {
        self.source.cluster_aliases()
    }
    /// The aliases for which a client of `flavor` has been created.
    pub fn cached_aliases(
        &self,
        flavor: ClientFlavor,
    ) -> Vec<String>
    {
        match flavor {
            ClientFlavor::General => self.general.cached_aliases(),
            ClientFlavor::Admin => self.admin.cached_aliases(),
            ClientFlavor::Sql => self.sql.cached_aliases(),
        }
    }
    pub fn close(&self)
    {
        self.general.close();
        self.admin.close();
        self.sql.close();
    }
}

impl DefaultRegistry {
    /// A registry with the bundled clients, which do not touch the network.
    pub fn with_source(
        source: impl PropertySource + 'static,
    ) -> Self
    {
        ClientRegistry::new(source, HBaseConnector::new(), HBaseConnector::new(), HBaseConnector::new())
    }
    /// A registry with the bundled clients, which require a reachable quorum member.
    pub fn with_probe(
        source: impl PropertySource + 'static,
        timeout: Duration,
        parallel: usize,
    ) -> Self
    {
        ClientRegistry::new(
            source,
            HBaseConnector::with_probe(timeout, parallel),
            HBaseConnector::with_probe(timeout, parallel),
            HBaseConnector::with_probe(timeout, parallel),
        )
    }
}

/// Install `registry` as the process wide registry.
/// This can be done once, and only before [`global`] is called.
pub fn install(
    registry: DefaultRegistry,
) -> Result<&'static DefaultRegistry, RegistryError>
{
    REGISTRY.set(registry).map_err(|_| RegistryError::AlreadyInstalled)?;
    Ok(global())
}

/// The process wide registry.
///
/// If none is installed, it is created at the first call from the file in `HBASE_REGISTRY_PROPERTIES`,
/// or `hbase.properties` if that variable is not set.
/// The registry lives until the process ends.
pub fn global() -> &'static DefaultRegistry
{
    REGISTRY.get_or_init(|| {
        let properties_file = env::var(PROPERTIES_FILE_VARIABLE).unwrap_or_else(|_| DEFAULT_PROPERTIES_FILE.to_string());
        let source = ClusterProperties::from_file(Path::new(&properties_file))
            .unwrap_or_else(|e| {
                warn!("no cluster configuration loaded: {:#}", e);
                ClusterProperties::new()
            });
        DefaultRegistry::with_source(source)
    })
}
