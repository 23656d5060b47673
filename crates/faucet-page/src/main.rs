//! Main entry point for the faucet page.

use anyhow::Result;
use clap::{Arg, Command};
use faucet_page::{config::FaucetConfig, http::start_server};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let matches = cli().get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();

    if matches.get_flag("generate-config") {
        return generate_config(config_path);
    }

    info!("Starting faucet page v{}", env!("CARGO_PKG_VERSION"));
    info!("Loading configuration from: {}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("Use --generate-config to create a default configuration file");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    info!("Configuration loaded and validated successfully");
    info!("Server will bind to: {}:{}", config.http.bind_address, config.http.port);
    info!("Verification server: {}", config.verification.base_url);
    info!("Page locale: {}", config.page.locale);

    if let Err(e) = start_server(&config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Command-line interface
fn cli() -> Command {
    Command::new("faucet-page")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Lloom Team")
        .about("Faucet claim page - request an API token via email verification")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file")
                .default_value("faucet-page.toml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .help("Generate a default configuration file and exit")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Load configuration from file
fn load_config(path: &str) -> Result<FaucetConfig> {
    if !Path::new(path).exists() {
        return Err(anyhow::anyhow!(
            "Configuration file '{}' not found. Use --generate-config to create one.",
            path
        ));
    }

    FaucetConfig::from_file(path).map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))
}

/// Generate a default configuration file
fn generate_config(path: &str) -> Result<()> {
    let config = FaucetConfig::default();

    config.save_to_file(path)?;

    println!("Generated default configuration file: {}", path);
    println!();
    println!("Before running the page, edit the configuration file:");
    println!("1. Point verification.base_url at your verification server");
    println!("2. Set http.session_header if an auth proxy supplies sessions");
    println!("3. List the networks shown in the faucet details card ([[networks]])");
    println!();
    println!("Example usage after configuration:");
    println!("  cargo run --bin faucet-page -- --config {}", path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path().join("faucet-page.toml");
        let temp_path = temp_path.to_str().unwrap();

        generate_config(temp_path)?;
        let config = load_config(temp_path)?;

        assert_eq!(config.http.port, 3000);
        assert_eq!(config.verification.send_code_path, "/api/send_verification_code");
        assert!(config.validate().is_ok());

        Ok(())
    }

    #[test]
    fn test_config_flag_defaults() {
        let matches = cli().get_matches_from(["faucet-page"]);
        assert_eq!(matches.get_one::<String>("config").unwrap(), "faucet-page.toml");
        assert!(!matches.get_flag("generate-config"));

        let matches = cli().get_matches_from(["faucet-page", "-c", "other.toml"]);
        assert_eq!(matches.get_one::<String>("config").unwrap(), "other.toml");
    }

    #[test]
    fn test_load_nonexistent_config() {

        let result = load_config("nonexistent-file.toml");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_broken_config_fails_to_parse() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path().join("broken.toml");
        std::fs::write(&temp_path, "[http]\nport = \"not a port\"\n")?;

        let result = load_config(temp_path.to_str().unwrap());
        assert!(result.unwrap_err().to_string().contains("Failed to parse config"));

        Ok(())
    }
}
