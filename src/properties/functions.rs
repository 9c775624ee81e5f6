//! The impls and functions
//!
use std::{collections::BTreeSet, fs, path::Path};
use log::*;
use regex::Regex;
use anyhow::{Context, Result};
use crate::properties::{ClusterProperties, PropertySource};

impl ClusterProperties {
    pub fn new() -> Self {
        Default::default()
    }
    /// Read a properties file.
    /// A file that cannot be read is an error, lines that cannot be parsed are skipped.
    pub fn from_file(
        path: &Path,
    ) -> Result<ClusterProperties>
    {
        info!("reading cluster properties from: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Error reading properties file: {}", path.display()))?;
        Ok(ClusterProperties::parse(&text))
    }
    /// Parse the contents of a properties file.
    ///
    /// - `#` and `!` start a comment line.
    /// - key and value are separated by the first `=` or `:`.
    /// - whitespace around key and value is removed.
    /// - a key that occurs more than once keeps the last value.
    pub fn parse(
        text: &str,
    ) -> ClusterProperties
    {
        let line_regex = Regex::new(r"^\s*([^=:\s][^=:]*?)\s*[=:]\s*(.*?)\s*$").unwrap();
        let mut clusterproperties = ClusterProperties::new();

        for (line_number, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            match line_regex.captures(line) {
                Some(captures) => {
                    clusterproperties.insert(&captures[1], &captures[2]);
                },
                None => {
                    warn!("skipping properties line {}, no key=value found: {}", line_number + 1, trimmed);
                },
            }
        }
        clusterproperties
    }
    pub fn insert(
        &mut self,
        key: &str,
        value: &str,
    )
    {
        self.properties.insert(key.to_string(), value.to_string());
    }
    /// Layer `other` over self: keys in `other` replace the keys in self.
    pub fn merge(
        &mut self,
        other: ClusterProperties,
    )
    {
        self.properties.extend(other.properties);
    }
}

impl PropertySource for ClusterProperties {
    fn cluster_aliases(&self) -> Vec<String>
    {
        let alias_regex = Regex::new(r"^(.+?)\.hbase\.(.+)$").unwrap();
        // a BTreeSet deduplicates and sorts the aliases, which makes the order deterministic.
        let aliases: BTreeSet<String> = self.properties.keys()
            .filter_map(|key| alias_regex.captures(key))
            .map(|captures| captures[1].to_string())
            .collect();
        aliases.into_iter().collect()
    }
    fn get_property(
        &self,
        key: &str,
        default: &str,
    ) -> String
    {
        match self.properties.get(key) {
            Some(value) if !value.trim().is_empty() => value.clone(),
            _ => {
                debug!("property {} not set, using default: '{}'", key, default);
                default.to_string()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_parse_properties_file_contents() {
        let text = r#"
# cluster definitions
cluster1.hbase.quorum=node1,node2,node3
cluster1.hbase.zk.client.port = 2181
! old style comment
cluster1.hbase.node.parent: /hbase
cluster2.hbase.quorum=zk1
this line has no separator
"#;
        let result = ClusterProperties::parse(text);
        assert_eq!(result.properties.len(), 4);
        assert_eq!(result.properties["cluster1.hbase.quorum"], "node1,node2,node3");
        assert_eq!(result.properties["cluster1.hbase.zk.client.port"], "2181");
        assert_eq!(result.properties["cluster1.hbase.node.parent"], "/hbase");
    }

    #[test]
    fn unit_parse_value_keeps_separators_after_the_first() {
        let result = ClusterProperties::parse("cluster1.hbase.client.properties=hbase.rpc.timeout=60000;a=b\n");
        assert_eq!(result.properties["cluster1.hbase.client.properties"], "hbase.rpc.timeout=60000;a=b");
    }

    #[test]
    fn unit_parse_duplicate_key_last_wins() {
        let result = ClusterProperties::parse("c.hbase.quorum=first\nc.hbase.quorum=second\n");
        assert_eq!(result.properties["c.hbase.quorum"], "second");
    }

    #[test]
    fn unit_cluster_aliases_sorted_and_distinct() {
        let result = ClusterProperties::parse(r#"
zeta.hbase.quorum=z1
alpha.hbase.quorum=a1
alpha.hbase.zk.client.port=2182
unrelated.key=value
.hbase.quorum=no-alias
"#);
        assert_eq!(result.cluster_aliases(), vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn unit_get_property_default_on_absent_and_blank() {
        let mut clusterproperties = ClusterProperties::new();
        clusterproperties.insert("c.hbase.quorum", "   ");
        clusterproperties.insert("c.hbase.node.parent", "/hbase-secure");
        assert_eq!(clusterproperties.get_property("c.hbase.quorum", "localhost"), "localhost");
        assert_eq!(clusterproperties.get_property("c.hbase.zk.client.port", "2181"), "2181");
        assert_eq!(clusterproperties.get_property("c.hbase.node.parent", "/hbase"), "/hbase-secure");
    }

    #[test]
    fn unit_merge_later_source_wins() {
        let mut base = ClusterProperties::parse("c.hbase.quorum=a\nc.hbase.node.parent=/hbase\n");
        base.merge(ClusterProperties::parse("c.hbase.quorum=b\n"));
        assert_eq!(base.get_property("c.hbase.quorum", ""), "b");
        assert_eq!(base.get_property("c.hbase.node.parent", ""), "/hbase");
    }
}
