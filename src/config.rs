//! Configuration file support for odoo-bom.
//!
//! Provides YAML-based configuration through `odoo-bom.config.yml` files,
//! the key-value credentials file, and the merge of both with CLI flags.

use anyhow::{bail, Context};
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use odoo_bom::adapters::outbound::filesystem::FileSystemReader;
use odoo_bom::adapters::outbound::network::OdooConnection;
use odoo_bom::bom_explosion::policies::{
    ComponentFilter, ExplosionRules, QuantityAdjustment, QuantityBracket,
};
use odoo_bom::shared::error::BomError;
use odoo_bom::shared::Result;

use crate::cli::Args;

const CONFIG_FILENAME: &str = "odoo-bom.config.yml";

const DEFAULT_URL: &str = "http://localhost:8069";
const DEFAULT_DB: &str = "odoo";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_LANG: &str = "en_GB";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 3;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub db: Option<String>,
    pub username: Option<String>,
    pub lang: Option<String>,
    pub collapse: Option<bool>,
    /// Replaces the built-in packaging keywords.
    pub filter_keywords: Option<Vec<String>>,
    /// Added on top of the (built-in or replaced) keywords.
    pub extra_filter_keywords: Option<Vec<String>>,
    pub quantity_brackets: Option<Vec<BracketEntry>>,
    pub retries: Option<u32>,
    pub timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// One row of the quantity bracket table.
#[derive(Debug, Deserialize)]
pub struct BracketEntry {
    pub min: f64,
    pub max: Option<f64>,
    pub deduct: f64,
}

/// Values read from a `--credentials` file.
#[derive(Debug, Default, PartialEq)]
pub struct Credentials {
    pub url: Option<String>,
    pub db: Option<String>,
    pub username: Option<String>,
    pub key: Option<String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = FileSystemReader::new()
        .read_settings_file(path, "config file")
        .with_context(|| {
            format!(
                "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
                path.display()
            )
        })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref brackets) = config.quantity_brackets {
        quantity_adjustment_from(brackets)?;
    }
    for (field, keywords) in [
        ("filter_keywords", &config.filter_keywords),
        ("extra_filter_keywords", &config.extra_filter_keywords),
    ] {
        if let Some(keywords) = keywords {
            if let Some(i) = keywords.iter().position(|k| k.trim().is_empty()) {
                bail!(
                    "Invalid config: {}[{}] must not be empty.\n\n\
                     💡 Hint: An empty keyword would exclude every component.",
                    field,
                    i
                );
            }
        }
    }
    if config.retries == Some(0) {
        bail!("Invalid config: retries must be at least 1.");
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

fn quantity_adjustment_from(entries: &[BracketEntry]) -> Result<QuantityAdjustment> {
    let brackets = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            QuantityBracket::new(entry.min, entry.max, entry.deduct)
                .with_context(|| format!("Invalid config: quantity_brackets[{}]", i))
        })
        .collect::<Result<Vec<_>>>()?;

    QuantityAdjustment::new(brackets).context(
        "Invalid config: quantity_brackets\n\n💡 Hint: Brackets must be sorted by 'min' and must not overlap.",
    )
}

/// Parses `key value` lines; unknown keys and malformed lines are ignored.
pub fn parse_credentials(content: &str) -> Credentials {
    let mut credentials = Credentials::default();

    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once(' ') else {
            continue;
        };
        let value = Some(value.trim().to_string());
        match key {
            "url" => credentials.url = value,
            "db" => credentials.db = value,
            "username" => credentials.username = value,
            "key" => credentials.key = value,
            _ => {}
        }
    }

    credentials
}

/// Reads a credentials file; a missing file is an error.
pub fn load_credentials(path: &Path) -> Result<Credentials> {
    if !path.exists() {
        return Err(BomError::CredentialsFileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = FileSystemReader::new().read_settings_file(path, "credentials file")?;
    Ok(parse_credentials(&content))
}

/// Merges flags/env, credentials file, config file and defaults, in that order.
///
/// # Errors
/// [`BomError::MissingCredential`] when no source provides an API key
pub fn resolve_connection(
    args: &Args,
    credentials: &Credentials,
    config: &ConfigFile,
) -> Result<OdooConnection> {
    let pick = |flag: &Option<String>, file: &Option<String>, yaml: &Option<String>, default: &str| {
        flag.clone()
            .or_else(|| file.clone())
            .or_else(|| yaml.clone())
            .unwrap_or_else(|| default.to_string())
    };

    let api_key = args
        .api_key
        .clone()
        .or_else(|| credentials.key.clone())
        .filter(|key| !key.is_empty())
        .ok_or(BomError::MissingCredential)?;

    Ok(OdooConnection {
        url: pick(&args.url, &credentials.url, &config.url, DEFAULT_URL),
        db: pick(&args.db, &credentials.db, &config.db, DEFAULT_DB),
        username: pick(
            &args.username,
            &credentials.username,
            &config.username,
            DEFAULT_USERNAME,
        ),
        api_key,
        lang: pick(&args.lang, &None, &config.lang, DEFAULT_LANG),
        timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        max_retries: config.retries.unwrap_or(DEFAULT_RETRIES),
    })
}

/// Builds the filter, bracket and collapse rules from config and flags.
pub fn build_rules(args: &Args, config: &ConfigFile) -> Result<ExplosionRules> {
    let base_filter = match &config.filter_keywords {
        Some(keywords) => ComponentFilter::new(keywords.clone())?,
        None => ComponentFilter::default(),
    };

    let mut extra = config.extra_filter_keywords.clone().unwrap_or_default();
    extra.extend(args.exclude_keywords.iter().cloned());
    let filter = base_filter
        .extended_with(extra)
        .context("Invalid --exclude-keyword value")?;

    let quantity_adjustment = match &config.quantity_brackets {
        Some(entries) => quantity_adjustment_from(entries)?,
        None => QuantityAdjustment::default(),
    };

    let collapse = !args.no_collapse && config.collapse.unwrap_or(true);

    Ok(ExplosionRules::new(filter, quantity_adjustment, collapse))
}

/// `bom_<reference>_<YYYYMMDD_HHMMSS>.csv`, path separators replaced by `_`.
pub fn default_output_name(reference: &str, now: DateTime<Local>) -> String {
    let safe_reference = reference.replace(['/', '\\'], "_");
    format!("bom_{}_{}.csv", safe_reference, now.format("%Y%m%d_%H%M%S"))
}
