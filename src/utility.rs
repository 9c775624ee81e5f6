//! Utilities
use log::*;
use std::{collections::{BTreeMap, HashMap}, env, fs, path::{Path, PathBuf}};
use anyhow::{Context, Result};
use regex::Regex;
use crate::registry::{DEFAULT_PROPERTIES_FILE, PROPERTIES_FILE_VARIABLE};

/// Determine the cluster properties file.
///
/// In order of precedence: the `--properties-file` argument, `HBASE_REGISTRY_PROPERTIES` (possibly set via `.env`),
/// and the default `hbase.properties`.
pub fn set_properties_file(
    option: &Option<String>,
    changed_options: &mut HashMap<&str, String>,
) -> PathBuf
{
    let properties_file = match option {
        Some(properties_file) => {
            info!("properties-file argument set: using: {}", properties_file);
            // insert into changed_options to be written later on.
            changed_options.insert(PROPERTIES_FILE_VARIABLE, properties_file.to_string());
            properties_file.clone()
        },
        None => {
            match env::var(PROPERTIES_FILE_VARIABLE) {
                Ok(set_var) => {
                    info!("properties-file not set: set via .env: {}: {}", PROPERTIES_FILE_VARIABLE, set_var);
                    changed_options.insert(PROPERTIES_FILE_VARIABLE, set_var.to_owned());
                    set_var
                },
                Err(_e) => {
                    info!("properties-file not set: and not set via .env: using default: {}", DEFAULT_PROPERTIES_FILE);
                    DEFAULT_PROPERTIES_FILE.to_string()
                },
            }
        },
    };
    PathBuf::from(properties_file)
}

pub fn set_regex(
    regex: &Option<String>,
) -> Result<Regex>
{
    let regex = regex.as_deref().unwrap_or(".*");
    Regex::new(regex)
        .with_context(|| format!("Invalid regular expression: {}", regex))
}

/// Persist the options that were set explicitly, so a next run picks them up via `.env`.
///
/// The file is only written when asked for and there is something to write, and it replaces any existing file.
pub fn dotenv_writer(
    write_dotenv: bool,
    changed_options: HashMap<&str, String>,
    dotenv_file: &Path,
) -> Result<()>
{
    if !write_dotenv || changed_options.is_empty() {
        return Ok(());
    }
    info!("writing {}", dotenv_file.display());

    let contents: String = changed_options.into_iter()
        .collect::<BTreeMap<_, _>>()
        .iter()
        .inspect(|(key, value)| info!("{}={}", key, value))
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect();
    fs::write(dotenv_file, contents)
        .with_context(|| format!("Error writing dotenv file: {}", dotenv_file.display()))
}
