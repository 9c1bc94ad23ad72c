mod cli;
mod config;

use chrono::Local;
use cli::Args;
use config::{
    build_rules, default_output_name, discover_config, load_config_from_path, load_credentials,
    resolve_connection, Credentials,
};
use odoo_bom::adapters::outbound::console::StderrProgressReporter;
use odoo_bom::adapters::outbound::formatters::CsvFormatter;
use odoo_bom::adapters::outbound::network::{CachingCatalog, OdooCatalog, OdooRpcClient};
use odoo_bom::application::dto::BomRequest;
use odoo_bom::application::factories::{PresenterFactory, PresenterType};
use odoo_bom::application::use_cases::FetchBomUseCase;
use odoo_bom::ports::outbound::{BomFormatter, ProgressReporter};
use odoo_bom::shared::error::ExitCode;
use odoo_bom::shared::Result;
use std::path::Path;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run() -> Result<()> {
    let args = Args::parse_args();

    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(Path::new("."))?.unwrap_or_default(),
    };
    let credentials = match &args.credentials {
        Some(path) => load_credentials(path)?,
        None => Credentials::default(),
    };

    let connection = resolve_connection(&args, &credentials, &config)?;
    let rules = build_rules(&args, &config)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(&args.reference, Local::now()));

    let progress_reporter = StderrProgressReporter::new().verbose(args.verbose);
    progress_reporter.report(&format!(
        "🔌 Connecting to Odoo at {} (database: {})",
        connection.url, connection.db
    ));

    let rpc = OdooRpcClient::connect(&connection)?;
    progress_reporter.report(&format!("✅ Connected to Odoo (User ID: {})", rpc.uid()));

    // Lookahead and traversal share lookups within this run
    let catalog = CachingCatalog::new(OdooCatalog::new(rpc));
    let use_case = FetchBomUseCase::new(catalog, &progress_reporter);
    let response = use_case.execute(BomRequest::new(args.reference.clone(), rules))?;

    // Only the root survived; the use case has already warned
    if response.component_count() == 0 {
        return Ok(());
    }

    progress_reporter.report("📝 Generating CSV output...");
    let csv = CsvFormatter::new().format(&response.records)?;

    let presenter = PresenterFactory::create(PresenterType::from_output_arg(&output));
    presenter.present(&csv)?;

    Ok(())
}
