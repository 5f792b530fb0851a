use campus_coffee::adapters::osm_xml::parse_osm_node;
use campus_coffee::config::cli::Command;
use campus_coffee::config::toml_config::LogFormat;
use campus_coffee::domain::model::Pos;
use campus_coffee::utils::error::ErrorSeverity;
use campus_coffee::utils::{logger, validation::Validate};
use campus_coffee::{
    AppConfig, CliConfig, HttpOsmDataService, InMemoryPosStore, OsmToPosConverter, PosError,
    PosService, Result,
};
use clap::Parser;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定檔決定日誌格式，所以先載入
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting campus-coffee CLI");
    if config.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Import { node_id } => import(&config, *node_id).await,
        Command::Convert { file, node_id } => convert_file(file, *node_id),
    }
    .and_then(|pos| pos.to_json_pretty());

    match result {
        Ok(json) => {
            println!("{}", json);
        }
        Err(e) => {
            tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn import(config: &AppConfig, node_id: u64) -> Result<Pos> {
    let client = HttpOsmDataService::build_client(config)?;
    let osm_data = HttpOsmDataService::from_config(client, config);
    let service = PosService::new(InMemoryPosStore::new(), osm_data);

    service.import_from_osm_node(node_id).await
}

fn convert_file(path: &Path, node_id: u64) -> Result<Pos> {
    tracing::info!("📁 Converting OSM node {} from {}", node_id, path.display());
    let xml = std::fs::read_to_string(path)?;

    let node = parse_osm_node(&xml, node_id).map_err(|e| {
        tracing::error!("Error parsing OSM XML for node {}: {}", node_id, e);
        PosError::OsmNodeNotFound(node_id)
    })?;

    OsmToPosConverter::new().convert(&node)
}
