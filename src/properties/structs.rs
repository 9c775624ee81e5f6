//! The structs
//!
use std::collections::BTreeMap;

/// A source of cluster configuration.
///
/// Implementations must never fail on lookups: a missing or blank value resolves to the default.
pub trait PropertySource: Send + Sync {
    /// All cluster aliases known to the source, sorted.
    fn cluster_aliases(&self) -> Vec<String>;
    /// The value for `key`, or `default` if the key is absent or blank.
    fn get_property(&self, key: &str, default: &str) -> String;
}

/// In-memory property source, usually read from a `.properties` file.
#[derive(Debug, Default, Clone)]
pub struct ClusterProperties {
    pub properties: BTreeMap<String, String>,
}
