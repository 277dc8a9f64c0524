//! `llm-lab` command-line console

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod views;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::context::Context;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match Context::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Experiments(cmd) => commands::experiments::execute(&ctx, cmd).await,
        Commands::Responses(cmd) => commands::responses::execute(&ctx, cmd).await,
        Commands::Metrics(cmd) => commands::metrics::execute(&ctx, cmd).await,
        Commands::Export(args) => commands::export::execute(&ctx, args).await,
        Commands::Config(cmd) => commands::config::execute(&ctx, cmd).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "llm_lab=debug,llm_lab_sdk=debug,llm_lab_cli=debug"
    } else {
        "llm_lab=info,llm_lab_sdk=info,llm_lab_cli=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
