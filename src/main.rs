use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use honeyweb::configuration::config::Config;
use honeyweb::data_capture::CaptureLog;
use honeyweb::web_interface::web_server::WebServer;

#[derive(Parser)]
#[command(name = "honeyweb")]
#[command(version = "0.1.0")]
#[command(about = "A corporate-login decoy service that captures credential submissions")]
struct Args {
    /// Optional TOML configuration file. When given, it replaces the
    /// individual flags below.
    #[arg(long)]
    config_file: Option<PathBuf>,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() {
    // Example how to log
    // https://docs.rs/env_logger/latest/env_logger/
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    println!(
        "
██╗  ██╗ ██████╗ ███╗   ██╗███████╗██╗   ██╗██╗    ██╗███████╗██████╗
██║  ██║██╔═══██╗████╗  ██║██╔════╝╚██╗ ██╔╝██║    ██║██╔════╝██╔══██╗
███████║██║   ██║██╔██╗ ██║█████╗   ╚████╔╝ ██║ █╗ ██║█████╗  ██████╔╝
██╔══██║██║   ██║██║╚██╗██║██╔══╝    ╚██╔╝  ██║███╗██║██╔══╝  ██╔══██╗
██║  ██║╚██████╔╝██║ ╚████║███████╗   ██║   ╚███╔███╔╝███████╗██████╔╝
╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═══╝╚══════╝   ╚═╝    ╚══╝╚══╝ ╚══════╝╚═════╝
======================================================================
           A corporate-login credential-capture decoy v0.1.0
======================================================================
"
    );

    let args = Args::parse();

    let config = match args.config_file {
        Some(ref path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Unable to import configuration from file: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            if let Err(e) = args.config.validate() {
                error!("Invalid configuration: {}", e);
                std::process::exit(1);
            }
            args.config
        }
    };
    info!("Configuration imported successfully");

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid bind address: {}", e);
            std::process::exit(1);
        }
    };

    let capture_log = match CaptureLog::open(&config.log_path) {
        Ok(capture_log) => Arc::new(capture_log),
        Err(e) => {
            error!("Unable to open the capture log: {}, exiting...", e);
            std::process::exit(1);
        }
    };

    let server = WebServer::new(capture_log);
    if let Err(e) = server.start(addr).await {
        error!("Error occured in the web server: {}, exiting...", e);
        std::process::exit(1);
    }
}
