//
//  iam-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use iam_api::cli::{exit_code_for, Cli, Commands};
use iam_api::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging from `IAM_DEBUG`, e.g. `IAM_DEBUG=iam_api=debug`
fn init_logging() {
    let filter = EnvFilter::try_from_env("IAM_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Permit(cmd) => cmd.run(&cli.global).await,
        Commands::Policies(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("iam-permit version {}", iam_api::VERSION);
            Ok(())
        }
    }
}
