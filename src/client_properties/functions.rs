//! The impls and functions
//!
use std::collections::BTreeMap;
use log::*;
use crate::properties::PropertySource;
use crate::client_properties::{
    ClientProperties,
    RESOLVED_KEYS,
    EXTRA_PROPERTIES_SUFFIX,
    EXTRA_PAIR_DELIMITER,
    EXTRA_KEY_VALUE_DELIMITER,
};

impl ClientProperties {
    /// Build the client properties for `alias`.
    ///
    /// This never fails: every key that is not set resolves to its default.
    pub fn build(
        source: &dyn PropertySource,
        alias: &str,
    ) -> ClientProperties
    {
        info!("resolving client properties for cluster: {}", alias);
        let mut clientproperties = ClientProperties {
            alias: alias.to_string(),
            ..Default::default()
        };

        for (suffix, canonical_key, default) in RESOLVED_KEYS {
            let value = source.get_property(&format!("{}.{}", alias, suffix), default);
            clientproperties.properties.insert(canonical_key.to_string(), value);
        }

        let extra_properties = source.get_property(&format!("{}.{}", alias, EXTRA_PROPERTIES_SUFFIX), "");
        if !extra_properties.trim().is_empty() {
            for (key, value) in parse_extra_properties(&extra_properties) {
                if let Some(previous) = clientproperties.properties.get(&key) {
                    debug!("cluster {}: {} overridden by client properties: '{}' -> '{}'", alias, key, previous, value);
                }
                clientproperties.properties.insert(key, value);
            }
        }
        clientproperties
    }
    /// The value of `key`, or an empty string if it is not set.
    pub fn get(
        &self,
        key: &str,
    ) -> &str
    {
        self.properties.get(key).map(String::as_str).unwrap_or_default()
    }
    pub fn print(&self)
    {
        for (key, value) in &self.properties {
            println!("{:40} {}", key, value);
        }
    }
}

/// Parse the free form client properties block.
///
/// Pairs are separated by `;`, key and value by `=`: `hbase.rpc.timeout=60000;hbase.client.retries.number=3`.
/// A pair without exactly one `=`, or with an empty key or value, is skipped.
pub fn parse_extra_properties(
    text: &str,
) -> BTreeMap<String, String>
{
    let mut extra_properties: BTreeMap<String, String> = BTreeMap::new();

    for pair in text.split(EXTRA_PAIR_DELIMITER) {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let fields: Vec<&str> = pair.split(EXTRA_KEY_VALUE_DELIMITER).collect();
        match fields[..] {
            [key, value] if !key.trim().is_empty() && !value.trim().is_empty() => {
                extra_properties.insert(key.trim().to_string(), value.trim().to_string());
            },
            _ => warn!("skipping malformed client property: '{}'", pair),
        }
    }
    extra_properties
}
