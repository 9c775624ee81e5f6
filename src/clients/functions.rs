//! The impls and functions
//!
use std::{marker::PhantomData, net::{TcpStream, ToSocketAddrs}, sync::mpsc::channel, time::{Duration, Instant}};
use chrono::Local;
use log::*;
use anyhow::{bail, Context, Result};
use crate::client_properties::*;
use crate::clients::{
    ClientHandle,
    ConnectionSettings,
    HBaseAdminClient,
    HBaseClient,
    HBaseConnector,
    HBaseFlavor,
    HBaseSqlClient,
    KerberosSettings,
    ProbeSettings,
    SecurityMode,
};
use crate::registry::{ClientConnector, ClientFlavor};

impl ConnectionSettings {
    /// Parse and validate the client properties.
    pub fn from_properties(
        clientproperties: &ClientProperties,
    ) -> Result<ConnectionSettings>
    {
        let client_port: u16 = clientproperties.get(CLIENT_PORT).trim().parse()
            .with_context(|| format!("Invalid {}: '{}'", CLIENT_PORT, clientproperties.get(CLIENT_PORT)))?;

        let quorum: Vec<String> = clientproperties.get(QUORUM)
            .split(',')
            .map(str::trim)
            .filter(|member| !member.is_empty())
            .map(|member| {
                // a quorum member can carry its own port.
                if member.contains(':') {
                    member.to_string()
                } else {
                    format!("{}:{}", member, client_port)
                }
            })
            .collect();
        if quorum.is_empty() {
            bail!("Empty {}", QUORUM);
        }

        let znode_parent = clientproperties.get(ZNODE_PARENT).trim().to_string();
        if !znode_parent.starts_with('/') {
            bail!("Invalid {}: '{}', it must start with '/'", ZNODE_PARENT, znode_parent);
        }

        let security = if clientproperties.get(HBASE_AUTHENTICATION).trim().eq_ignore_ascii_case("kerberos") {
            let kerberos = KerberosSettings {
                hadoop_authentication: clientproperties.get(HADOOP_AUTHENTICATION).to_string(),
                krb5_conf: clientproperties.get(KRB5_CONF).to_string(),
                keytab_file: clientproperties.get(KEYTAB_FILE).to_string(),
                principal: clientproperties.get(KERBEROS_PRINCIPAL).to_string(),
                master_principal: clientproperties.get(MASTER_KERBEROS_PRINCIPAL).to_string(),
                regionserver_principal: clientproperties.get(REGIONSERVER_KERBEROS_PRINCIPAL).to_string(),
            };
            if kerberos.keytab_file.is_empty() || kerberos.principal.is_empty() {
                bail!("Kerberos authentication requires {} and {}", KEYTAB_FILE, KERBEROS_PRINCIPAL);
            }
            SecurityMode::Kerberos(kerberos)
        } else {
            SecurityMode::Simple
        };

        let extra = clientproperties.properties.iter()
            .filter(|(key, _)| !RESOLVED_KEYS.iter().any(|(_, canonical_key, _)| *canonical_key == key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(ConnectionSettings {
            quorum,
            client_port,
            znode_parent,
            security,
            extra,
        })
    }
    pub fn security_mode(&self) -> &str
    {
        match self.security {
            SecurityMode::Simple => "simple",
            SecurityMode::Kerberos(_) => "kerberos",
        }
    }
}

impl ClientHandle {
    pub fn print(&self)
    {
        println!("{:20} {}", "alias", self.alias);
        println!("{:20} {}", "flavor", self.flavor);
        println!("{:20} {}", "created", self.created);
        println!("{:20} {}", "quorum", self.settings.quorum.join(","));
        println!("{:20} {}", "znode_parent", self.settings.znode_parent);
        println!("{:20} {}", "security", self.settings.security_mode());
        if let SecurityMode::Kerberos(kerberos) = &self.settings.security {
            println!("{:20} {}", "principal", kerberos.principal);
            println!("{:20} {}", "keytab", kerberos.keytab_file);
        }
        for (key, value) in &self.settings.extra {
            println!("{:20} {}={}", "extra", key, value);
        }
    }
}

impl HBaseFlavor for HBaseClient {
    const FLAVOR: ClientFlavor = ClientFlavor::General;
    fn from_handle(handle: ClientHandle) -> Self { HBaseClient(handle) }
}
impl HBaseFlavor for HBaseAdminClient {
    const FLAVOR: ClientFlavor = ClientFlavor::Admin;
    fn from_handle(handle: ClientHandle) -> Self { HBaseAdminClient(handle) }
}
impl HBaseFlavor for HBaseSqlClient {
    const FLAVOR: ClientFlavor = ClientFlavor::Sql;
    fn from_handle(handle: ClientHandle) -> Self { HBaseSqlClient(handle) }
}

impl<C> HBaseConnector<C> {
    /// A connector that does not touch the network.
    pub fn new() -> Self {
        HBaseConnector { probe: None, flavor: PhantomData }
    }
    /// A connector that requires a reachable quorum member before creating a client.
    pub fn with_probe(
        timeout: Duration,
        parallel: usize,
    ) -> Self
    {
        HBaseConnector { probe: Some(ProbeSettings { timeout, parallel }), flavor: PhantomData }
    }
}

impl<C> Default for HBaseConnector<C> {
    fn default() -> Self {
        HBaseConnector::new()
    }
}

impl<C: HBaseFlavor> ClientConnector for HBaseConnector<C> {
    type Client = C;

    fn connect(
        &self,
        alias: &str,
        clientproperties: &ClientProperties,
    ) -> Result<C>
    {
        let settings = ConnectionSettings::from_properties(clientproperties)
            .with_context(|| format!("Cluster {}: invalid client properties", alias))?;
        if let Some(probe) = self.probe {
            let reachable = probe_quorum(&settings.quorum, probe.timeout, probe.parallel)?;
            if reachable.is_empty() {
                bail!("Cluster {}: no quorum member of {} is reachable", alias, settings.quorum.join(","));
            }
            debug!("cluster {}: reachable quorum members: {:?}", alias, reachable);
        }
        Ok(C::from_handle(ClientHandle {
            alias: alias.to_string(),
            flavor: C::FLAVOR,
            settings,
            created: Local::now(),
        }))
    }
}

/// Try a tcp connection to every quorum member in parallel, and return the members that accepted.
pub fn probe_quorum(
    quorum: &[String],
    timeout: Duration,
    parallel: usize,
) -> Result<Vec<String>>
{
    info!("begin parallel quorum probe");
    let timer = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new().num_threads(parallel.max(1)).build()
        .with_context(|| "Error creating probe thread pool")?;
    let (tx, rx) = channel();
    pool.scope(move |s| {
        for member in quorum {
            let tx = tx.clone();
            s.spawn(move |_| {
                if probe_member(member, timeout) {
                    tx.send(member.clone()).expect("error sending data via tx");
                }
            });
        }
    });

    info!("end parallel quorum probe {:?}", timer.elapsed());

    let mut reachable: Vec<String> = rx.iter().collect();
    reachable.sort();
    Ok(reachable)
}

fn probe_member(
    member: &str,
    timeout: Duration,
) -> bool
{
    let addresses = match member.to_socket_addrs() {
        Ok(addresses) => addresses,
        Err(e) => {
            warn!("Quorum member {} cannot be resolved: {}", member, e);
            return false;
        },
    };
    for address in addresses {
        if TcpStream::connect_timeout(&address, timeout).is_ok() {
            return true;
        }
    }
    warn!("Quorum member {} cannot be reached, skipping", member);
    false
}
