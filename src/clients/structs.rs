//! The structs
//!
use std::{collections::BTreeMap, marker::PhantomData, ops::Deref, time::Duration};
use chrono::{DateTime, Local};
use crate::registry::ClientFlavor;

/// The kerberos settings, only used when `hbase.security.authentication=kerberos`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct KerberosSettings {
    pub hadoop_authentication: String,
    pub krb5_conf: String,
    pub keytab_file: String,
    pub principal: String,
    pub master_principal: String,
    pub regionserver_principal: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub enum SecurityMode {
    #[default]
    Simple,
    Kerberos(KerberosSettings),
}

/// The parsed and validated client properties.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Every quorum member as `hostname:port`.
    pub quorum: Vec<String>,
    pub client_port: u16,
    pub znode_parent: String,
    pub security: SecurityMode,
    /// All properties that are not one of the canonical keys.
    pub extra: BTreeMap<String, String>,
}

/// The state shared by all client flavors.
#[derive(Serialize, Debug, Clone)]
pub struct ClientHandle {
    pub alias: String,
    pub flavor: ClientFlavor,
    pub settings: ConnectionSettings,
    pub created: DateTime<Local>,
}

/// Client for table operations.
#[derive(Debug)]
pub struct HBaseClient(pub ClientHandle);
/// Client for administrative operations.
#[derive(Debug)]
pub struct HBaseAdminClient(pub ClientHandle);
/// Client for sql operations.
#[derive(Debug)]
pub struct HBaseSqlClient(pub ClientHandle);

impl Deref for HBaseClient {
    type Target = ClientHandle;
    fn deref(&self) -> &ClientHandle { &self.0 }
}
impl Deref for HBaseAdminClient {
    type Target = ClientHandle;
    fn deref(&self) -> &ClientHandle { &self.0 }
}
impl Deref for HBaseSqlClient {
    type Target = ClientHandle;
    fn deref(&self) -> &ClientHandle { &self.0 }
}

/// Implemented by the client types, to allow a single connector for all flavors.
pub trait HBaseFlavor: Deref<Target = ClientHandle> + Send + Sync + Sized {
    const FLAVOR: ClientFlavor;
    fn from_handle(handle: ClientHandle) -> Self;
}

/// Settings for probing the quorum when a client is created.
#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    pub timeout: Duration,
    pub parallel: usize,
}

/// The connector for client flavor `C`.
///
/// With `probe` set to `None` a client is created without any network access.
#[derive(Debug)]
pub struct HBaseConnector<C> {
    pub probe: Option<ProbeSettings>,
    pub flavor: PhantomData<fn() -> C>,
}
