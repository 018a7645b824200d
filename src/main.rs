//! # webcalc CLI
//!
//! Serves the calculator over HTTP, or evaluates expressions from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

use webcalc::config::{self, Config};
use webcalc::server::Server;
use webcalc::telemetry::{TelemetryConfig, init_logging};

#[derive(Parser)]
#[command(name = "webcalc")]
#[command(version)]
#[command(about = "A web calculator with a restricted math evaluator", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the calculator server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },

    /// Evaluate expressions and print one result per line
    Eval {
        /// Expressions to evaluate
        #[arg(required = true)]
        expressions: Vec<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut cfg = Config::load_from(cli.config.as_deref());

    if let Some(level) = cli.log_level {
        cfg.log_level = level;
    }
    if cli.json_logs {
        cfg.json_logs = true;
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => {
            if let Some(host) = host {
                cfg.host = host;
            }
            if let Some(port) = port {
                cfg.port = port;
            }
            if no_cors {
                cfg.cors = false;
            }

            init_logging(&cfg.telemetry());

            let calculator = cfg.calculator()?;
            let server_config = cfg.server_config()?;
            Server::new(server_config, calculator).run().await?;
        }

        Commands::Eval { expressions } => {
            // Keep stdout for results unless logging was asked for.
            let telemetry = if cli_log_requested(&cfg) {
                cfg.telemetry()
            } else {
                TelemetryConfig::new("webcalc").with_log_level("warn")
            };
            init_logging(&telemetry);

            let calculator = cfg.calculator()?;
            for expression in &expressions {
                println!("{}", calculator.evaluate(expression));
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config::show_config(cli.config.as_deref());
            }
            ConfigAction::Path => {
                let path = cli.config.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

fn cli_log_requested(cfg: &Config) -> bool {
    cfg.json_logs || cfg.log_level != "info"
}
