use std::{env, fs, path::PathBuf, process, sync::Arc};
use hbase_registry::{registry, ClientFlavor, ClientProperties, ClusterProperties, DefaultRegistry, PropertySource, RegistryError};
use hbase_registry::client_properties::{CLIENT_PORT, KEYTAB_FILE, QUORUM, ZNODE_PARENT};
use hbase_registry::clients::SecurityMode;

const CLUSTERS: &str = r#"
# two plain clusters and a kerberized one
cluster1.hbase.quorum=node1,node2,node3
cluster1.hbase.zk.client.port=2181
cluster1.hbase.node.parent=/hbase

cluster2.hbase.quorum=zk1:2182
cluster2.hbase.node.parent=/hbase-unsecure
cluster2.hbase.client.properties=hbase.rpc.timeout=60000;hbase.client.retries.number=3

secure.hbase.quorum=kdc-zk1,kdc-zk2
secure.hbase.hadoop.security.authentication=kerberos
secure.hbase.hbase.security.authentication=kerberos
secure.hbase.java.security.krb5.conf=/etc/krb5.conf
secure.hbase.keytab.file=/etc/security/keytabs/hbase.keytab
secure.hbase.kerberos.principal=hbase@EXAMPLE.COM
secure.hbase.master.kerberos.principal=hbase/_HOST@EXAMPLE.COM
secure.hbase.regionserver.kerberos.principal=hbase/_HOST@EXAMPLE.COM
"#;

fn write_properties_file(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("hbase_registry_{}_{}.properties", name, process::id()));
    fs::write(&path, contents).unwrap();
    path
}

fn load(name: &str) -> ClusterProperties {
    let path = write_properties_file(name, CLUSTERS);
    let clusterproperties = ClusterProperties::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();
    clusterproperties
}

#[test]
fn integration_read_cluster_aliases_from_file() {
    let clusterproperties = load("aliases");
    assert_eq!(clusterproperties.cluster_aliases(), vec!["cluster1", "cluster2", "secure"]);
}

#[test]
fn integration_missing_properties_file() {
    let path = env::temp_dir().join(format!("hbase_registry_missing_{}.properties", process::id()));
    assert!(ClusterProperties::from_file(&path).is_err());
}

#[test]
fn integration_build_client_properties() {
    let clusterproperties = load("build");

    let cluster1 = ClientProperties::build(&clusterproperties, "cluster1");
    assert_eq!(cluster1.get(QUORUM), "node1,node2,node3");
    assert_eq!(cluster1.get(CLIENT_PORT), "2181");
    assert_eq!(cluster1.get(ZNODE_PARENT), "/hbase");
    assert_eq!(cluster1.get(KEYTAB_FILE), "");

    let cluster2 = ClientProperties::build(&clusterproperties, "cluster2");
    assert_eq!(cluster2.get(ZNODE_PARENT), "/hbase-unsecure");
    assert_eq!(cluster2.get("hbase.rpc.timeout"), "60000");
    assert_eq!(cluster2.get("hbase.client.retries.number"), "3");
}

#[test]
fn integration_registry_serves_all_flavors() {
    let clientregistry = DefaultRegistry::with_source(load("flavors"));

    let client = clientregistry.get_client("cluster1").unwrap();
    let admin = clientregistry.get_admin_client("cluster1").unwrap();
    let sql = clientregistry.get_sql_client("cluster1").unwrap();
    assert_eq!(client.flavor, ClientFlavor::General);
    assert_eq!(admin.flavor, ClientFlavor::Admin);
    assert_eq!(sql.flavor, ClientFlavor::Sql);
    assert_eq!(client.settings, admin.settings);

    // the second request returns the same client.
    assert!(Arc::ptr_eq(&client, &clientregistry.get_client("cluster1").unwrap()));
    assert_eq!(clientregistry.cached_aliases(ClientFlavor::General), vec!["cluster1", "cluster2", "secure"]);

    let secure = clientregistry.get_admin_client("secure").unwrap();
    match &secure.settings.security {
        SecurityMode::Kerberos(kerberos) => assert_eq!(kerberos.principal, "hbase@EXAMPLE.COM"),
        SecurityMode::Simple => panic!("secure should use kerberos"),
    }

    let cluster2 = clientregistry.get_sql_client("cluster2").unwrap();
    assert_eq!(cluster2.settings.quorum, vec!["zk1:2182"]);
}

#[test]
fn integration_registry_unknown_cluster() {
    let clientregistry = DefaultRegistry::with_source(load("unknown"));
    let result = clientregistry.get_client("cluster9");
    assert!(matches!(result, Err(RegistryError::ClusterNotFound { .. })));
    assert!(clientregistry.get_client("cluster2").is_ok());
}

#[test]
fn integration_invalid_cluster_aborts_population() {
    let mut clusterproperties = load("invalid");
    // sorts before cluster1, so the population pass stops before creating any client.
    clusterproperties.insert("broken.hbase.zk.client.port", "not-a-port");
    let clientregistry = DefaultRegistry::with_source(clusterproperties);

    let result = clientregistry.get_client("cluster1");
    assert!(matches!(result, Err(RegistryError::ClientConstruction { ref alias, .. }) if alias == "broken"));
    assert!(clientregistry.cached_aliases(ClientFlavor::General).is_empty());
}

#[test]
fn integration_process_wide_registry() {
    let installed = registry::install(DefaultRegistry::with_source(load("global"))).unwrap();
    assert!(std::ptr::eq(installed, registry::global()));
    assert!(registry::global().get_client("cluster1").is_ok());

    let again = registry::install(DefaultRegistry::with_source(ClusterProperties::new()));
    assert!(matches!(again, Err(RegistryError::AlreadyInstalled)));
}
