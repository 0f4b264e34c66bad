//! agent-installer - systemd agent unit installer

use std::process::ExitCode;

use agent_installer::cli::Cli;
use agent_installer::output::json::{error_code, format_error};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let rendered = if json {
                format_error(&format!("{e:#}"), error_code(&e)).ok()
            } else {
                None
            };
            match rendered {
                Some(doc) => println!("{doc}"),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
