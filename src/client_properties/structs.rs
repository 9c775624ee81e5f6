//! The structs
//!
use std::collections::BTreeMap;

pub const QUORUM: &str = "hbase.zookeeper.quorum";
pub const CLIENT_PORT: &str = "hbase.zookeeper.property.clientPort";
pub const ZNODE_PARENT: &str = "zookeeper.znode.parent";
pub const KRB5_CONF: &str = "java.security.krb5.conf";
pub const HADOOP_AUTHENTICATION: &str = "hadoop.security.authentication";
pub const HBASE_AUTHENTICATION: &str = "hbase.security.authentication";
pub const KEYTAB_FILE: &str = "keytab.file";
pub const KERBEROS_PRINCIPAL: &str = "kerberos.principal";
pub const MASTER_KERBEROS_PRINCIPAL: &str = "hbase.master.kerberos.principal";
pub const REGIONSERVER_KERBEROS_PRINCIPAL: &str = "hbase.regionserver.kerberos.principal";

pub const DEFAULT_QUORUM: &str = "localhost";
pub const DEFAULT_CLIENT_PORT: &str = "2181";
pub const DEFAULT_ZNODE_PARENT: &str = "/hbase";

/// The suffix of the free form block: `<alias>.hbase.client.properties`.
pub const EXTRA_PROPERTIES_SUFFIX: &str = "hbase.client.properties";
pub const EXTRA_PAIR_DELIMITER: char = ';';
pub const EXTRA_KEY_VALUE_DELIMITER: char = '=';

/// Mapping of the per cluster suffix to the canonical key and its default.
///
/// The first three are always set to a non-empty value,
/// the security and kerberos keys are always set, but can be empty.
pub const RESOLVED_KEYS: [(&str, &str, &str); 10] = [
    ("hbase.quorum", QUORUM, DEFAULT_QUORUM),
    ("hbase.zk.client.port", CLIENT_PORT, DEFAULT_CLIENT_PORT),
    ("hbase.node.parent", ZNODE_PARENT, DEFAULT_ZNODE_PARENT),
    ("hbase.hadoop.security.authentication", HADOOP_AUTHENTICATION, ""),
    ("hbase.hbase.security.authentication", HBASE_AUTHENTICATION, ""),
    ("hbase.java.security.krb5.conf", KRB5_CONF, ""),
    ("hbase.keytab.file", KEYTAB_FILE, ""),
    ("hbase.kerberos.principal", KERBEROS_PRINCIPAL, ""),
    ("hbase.master.kerberos.principal", MASTER_KERBEROS_PRINCIPAL, ""),
    ("hbase.regionserver.kerberos.principal", REGIONSERVER_KERBEROS_PRINCIPAL, ""),
];

/// The normalized property set handed to a client connector.
///
/// ```text
/// hbase.zookeeper.quorum=node1,node2,node3
/// hbase.zookeeper.property.clientPort=2181
/// zookeeper.znode.parent=/hbase
/// hadoop.security.authentication=
/// ...
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ClientProperties {
    /// The cluster alias these properties were built for.
    pub alias: String,
    pub properties: BTreeMap<String, String>,
}
