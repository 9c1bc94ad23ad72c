use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Credentials file format (for --credentials):
  url https://erp.example.com
  db database_name
  username user@example.com
  key your_api_key

Flags and environment variables take precedence over the credentials file,
which takes precedence over odoo-bom.config.yml.";

/// Fetch a product's Bill of Materials recursively from Odoo and export it as CSV
#[derive(Parser, Debug)]
#[command(name = "odoo-bom")]
#[command(version)]
#[command(about = "Fetch BOM data recursively from Odoo ERP and export it as CSV", long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Internal reference of the product to explode (e.g. ROOT-1)
    #[arg(short, long, value_name = "REFERENCE")]
    pub reference: String,

    /// Output CSV file; "-" writes to stdout
    /// (default: bom_<reference>_<timestamp>.csv)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Odoo server URL
    #[arg(long, env = "ODOO_URL")]
    pub url: Option<String>,

    /// Odoo database name
    #[arg(long, env = "ODOO_DB")]
    pub db: Option<String>,

    /// Odoo login
    #[arg(long, env = "ODOO_USERNAME")]
    pub username: Option<String>,

    /// Odoo API key
    #[arg(long, env = "ODOO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Key-value credentials file (url, db, username, key)
    #[arg(long, value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Path to config file (default: auto-discover odoo-bom.config.yml in current directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Locale for product names (default: en_GB)
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Keep every intermediate BOM level instead of collapsing single-child chains
    #[arg(long)]
    pub no_collapse: bool,

    /// Also exclude components whose name contains this keyword.
    /// Can be specified multiple times: -x "gasket" -x "spare"
    #[arg(short = 'x', long = "exclude-keyword", value_name = "KEYWORD")]
    pub exclude_keywords: Vec<String>,

    /// Print every component line while fetching
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
