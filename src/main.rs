//! hbase_registry: resolve and obtain HBase clients for the clusters in a properties file.
//!
//! ```text
//! hbase_registry --properties-file clusters.properties --list-clusters
//! hbase_registry --print-properties cluster1 --json
//! hbase_registry --connect cluster1 --flavor admin --probe
//! ```
use std::{collections::HashMap, path::Path, time::Duration};
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use log::*;
use anyhow::Result;
use hbase_registry::{utility, registry, ClientFlavor, ClientProperties, ClusterProperties, DefaultRegistry};
use hbase_registry::clients::{ClientHandle, ConnectionSettings};

/// Reads the cluster definitions from a properties file (`<alias>.hbase.<key>=<value>`),
/// and shows the resolved client properties or creates a client via the registry.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// properties file with the cluster definitions (default: hbase.properties)
    #[arg(short = 'f', long, value_name = "path")]
    properties_file: Option<String>,
    /// list the configured clusters
    #[arg(short, long)]
    list_clusters: bool,
    /// regex to select the clusters to list
    #[arg(long, value_name = "regex")]
    cluster_match: Option<String>,
    /// print the resolved client properties of a cluster
    #[arg(long, value_name = "alias")]
    print_properties: Option<String>,
    /// print as json
    #[arg(long)]
    json: bool,
    /// obtain the client of a cluster through the registry
    #[arg(short, long, value_name = "alias")]
    connect: Option<String>,
    /// the client flavor to obtain with --connect
    #[arg(long, value_enum, default_value_t = ClientFlavor::General)]
    flavor: ClientFlavor,
    /// require a reachable zookeeper quorum member when creating a client
    #[arg(long)]
    probe: bool,
    /// quorum probe timeout in milliseconds
    #[arg(long, default_value_t = 3000)]
    probe_timeout: u64,
    /// number of parallel quorum probes
    #[arg(long, default_value_t = 3)]
    parallel: usize,
    /// write the changed options to .env
    #[arg(long)]
    write_dotenv: bool,
}

fn main() -> Result<()>
{
    env_logger::init();
    dotenv().ok();
    let options = Opts::parse();

    let mut changed_options = HashMap::new();
    let properties_file = utility::set_properties_file(&options.properties_file, &mut changed_options);
    let source = ClusterProperties::from_file(&properties_file)?;

    let clientregistry = if options.probe {
        DefaultRegistry::with_probe(source, Duration::from_millis(options.probe_timeout), options.parallel)
    } else {
        DefaultRegistry::with_source(source)
    };
    let registry = registry::install(clientregistry)?;

    execute(&options, registry, changed_options, Path::new(".env"))
}

/// Perform the requested action, and write the changed options to `dotenv_file` whether the action succeeded or not.
fn execute(
    options: &Opts,
    registry: &DefaultRegistry,
    changed_options: HashMap<&str, String>,
    dotenv_file: &Path,
) -> Result<()>
{
    let result = if options.list_clusters {
        utility::set_regex(&options.cluster_match)
            .map(|cluster_filter| list_clusters(registry, &cluster_filter))
    } else if let Some(alias) = &options.print_properties {
        print_properties(registry, alias, options.json)
    } else if let Some(alias) = &options.connect {
        connect(registry, alias, options.flavor, options.json)
    } else {
        info!("no action specified, use --list-clusters, --print-properties or --connect");
        Ok(())
    };
    if let Err(e) = &result {
        error!("{:#}", e);
    }

    utility::dotenv_writer(options.write_dotenv, changed_options, dotenv_file)?;

    result
}

fn list_clusters(
    registry: &DefaultRegistry,
    cluster_filter: &regex::Regex,
)
{
    println!("{:20} {:10} {:50}", "alias", "security", "quorum");
    for alias in registry.cluster_aliases().iter().filter(|alias| cluster_filter.is_match(alias)) {
        let clientproperties = ClientProperties::build(registry.source.as_ref(), alias);
        match ConnectionSettings::from_properties(&clientproperties) {
            Ok(settings) => {
                println!("{:20} {:10} {:50}", alias.green(), settings.security_mode(), settings.quorum.join(","));
            },
            Err(e) => {
                println!("{:20} {:10} {:#}", alias.red(), "-", e);
            },
        }
    }
}

fn print_properties(
    registry: &DefaultRegistry,
    alias: &str,
    json: bool,
) -> Result<()>
{
    if !registry.cluster_aliases().iter().any(|known| known == alias) {
        warn!("cluster {} is not configured, showing defaults", alias);
    }
    let clientproperties = ClientProperties::build(registry.source.as_ref(), alias);
    if json {
        println!("{}", serde_json::to_string_pretty(&clientproperties)?);
    } else {
        clientproperties.print();
    }
    Ok(())
}

fn connect(
    registry: &DefaultRegistry,
    alias: &str,
    flavor: ClientFlavor,
    json: bool,
) -> Result<()>
{
    let handle: ClientHandle = match flavor {
        ClientFlavor::General => registry.get_client(alias)?.0.clone(),
        ClientFlavor::Admin => registry.get_admin_client(alias)?.0.clone(),
        ClientFlavor::Sql => registry.get_sql_client(alias)?.0.clone(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&handle)?);
    } else {
        handle.print();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, process};
    use hbase_registry::registry::PROPERTIES_FILE_VARIABLE;

    #[test]
    fn unit_failed_connect_still_writes_dotenv() {
        let options = Opts::parse_from(["hbase_registry", "--connect", "nothere", "--write-dotenv"]);
        let clientregistry = DefaultRegistry::with_source(ClusterProperties::new());
        let dotenv_file = env::temp_dir().join(format!("hbase_registry_connect_{}.env", process::id()));
        let mut changed_options = HashMap::new();
        changed_options.insert(PROPERTIES_FILE_VARIABLE, "clusters.properties".to_string());

        let result = execute(&options, &clientregistry, changed_options, &dotenv_file);
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&dotenv_file).unwrap(), "HBASE_REGISTRY_PROPERTIES=clusters.properties\n");
        fs::remove_file(&dotenv_file).unwrap();
    }

    #[test]
    fn unit_no_action_without_write_dotenv_writes_nothing() {
        let options = Opts::parse_from(["hbase_registry"]);
        let clientregistry = DefaultRegistry::with_source(ClusterProperties::new());
        let dotenv_file = env::temp_dir().join(format!("hbase_registry_noaction_{}.env", process::id()));
        let mut changed_options = HashMap::new();
        changed_options.insert(PROPERTIES_FILE_VARIABLE, "clusters.properties".to_string());

        assert!(execute(&options, &clientregistry, changed_options, &dotenv_file).is_ok());
        assert!(!dotenv_file.exists());
    }
}
