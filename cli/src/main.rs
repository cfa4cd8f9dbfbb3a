//! CLI entrypoint for trik-agent
//!
//! Wires the layers together, then runs a line-based REPL: each line is
//! one user turn. Passthrough content from the gateway is printed
//! directly, outside the assistant's answer.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trik_agent_infrastructure::{AgentSession, ConfigLoader};

#[derive(Parser, Debug)]
#[command(name = "trik-agent")]
#[command(about = "Conversational agent with trik gateway tool support")]
struct Cli {
    /// Trik gateway URL (overrides config)
    #[arg(long)]
    server_url: Option<String>,

    /// Decision model name (overrides config)
    #[arg(long)]
    model: Option<String>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config =
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?;
    if let Some(url) = cli.server_url {
        config.gateway.url = url;
    }
    if let Some(model) = cli.model {
        config.model.name = model;
    }

    println!("{}", "Trik Agent CLI".bold());
    println!("Loading tools from {}...\n", config.gateway.url);

    let mut session = AgentSession::initialize(&config)
        .await
        .with_context(|| format!("cannot connect to trik gateway at {}", config.gateway.url))?;
    info!("session initialized");

    let status = session.gateway_status();
    if let Some(version) = &status.version {
        println!("Gateway version: {}", version);
    }
    if status.loaded_triks.is_empty() {
        println!("No triks loaded from server.");
    } else {
        println!("Loaded triks: {}", status.loaded_triks.join(", "));
    }

    let tools = session.tools();
    println!("Total tools available: {}", tools.len());
    println!("Type \"/tools\" to list tools, \"exit\" or \"quit\" to end.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", "You:".green().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\nGoodbye!");
            break;
        };
        let input = line?.trim().to_string();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("\nGoodbye!");
            break;
        }
        if input.eq_ignore_ascii_case("/tools") {
            println!("\nAvailable tools:");
            for tool in session.tools() {
                println!("  - {}: {}", tool.name.cyan(), tool.description);
            }
            println!();
            continue;
        }

        match session.invoke(&input).await {
            Ok(answer) => {
                if let Some(content) = session.take_passthrough() {
                    println!(
                        "\n{}",
                        format!("--- Direct Content ({}) ---", content.content_type()).yellow()
                    );
                    println!("{}", content.content);
                    println!("{}\n", "--- End ---".yellow());
                }

                println!("\n{} {}\n", "Assistant:".blue().bold(), answer);
            }
            Err(e) => {
                eprintln!("\n{} {}", "Error:".red().bold(), e);
                eprintln!("Please try again.\n");
            }
        }
    }

    Ok(())
}
