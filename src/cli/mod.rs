use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::core::tool::ToolDescriptor;
use crate::infra::config::AppConfig;
use crate::tools::catalog::PLANNED_TOOLS;
use crate::tools::diagnostics::tool_router::DiagnosticsSvc;

#[derive(Parser)]
#[command(name = "kueue-mcp-server")]
#[command(about = "MCP server exposing Kueue diagnostic commands over stdio")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,
    /// Load and validate configuration, then print it
    Config,
    /// List registered and planned tools
    Tools,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => {
            let cfg = match AppConfig::from_env_and_toml() {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!(error = %e, "configuration error");
                    return ExitCode::FAILURE;
                }
            };
            match crate::infra::boot::run_server(cfg).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = %e, "server error");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Config => match load_config() {
            Ok(cfg) => {
                println!("Configuration is valid");
                println!("  oc: {}", cfg.oc_bin);
                println!("  kubectl: {}", cfg.kubectl_bin);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Tools => {
            print!("{}", render_tools());
            ExitCode::SUCCESS
        }
    }
}

fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    let cfg = AppConfig::from_env_and_toml()?;
    cfg.validate()?;
    Ok(cfg)
}

fn render_tools() -> String {
    let mut registered: Vec<String> = DiagnosticsSvc::router()
        .into_iter()
        .map(|r| r.name().to_string())
        .collect();
    registered.sort();

    let mut out = String::from("Registered tools:\n");
    for name in &registered {
        out.push_str(&format!("  {name}\n"));
    }
    out.push_str("Planned tools (not registered):\n");
    for tool in PLANNED_TOOLS {
        out.push_str(&render_planned(tool));
    }
    out
}

fn render_planned(tool: &ToolDescriptor) -> String {
    format!(
        "  {} - {}\n    {}\n    input schema: {}\n",
        tool.name,
        tool.title,
        tool.description,
        tool.input_schema()
    )
}
