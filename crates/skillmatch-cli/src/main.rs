// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SkillMatch command-line job search.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use skillmatch_config::AppConfig;
use skillmatch_cli::{run_search, OutputFormat, SearchRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SkillMatch - find job postings matching your skills.
#[derive(Parser, Debug)]
#[command(name = "skillmatch", about = "Search job postings by skills and location", version)]
struct Cli {
	/// Path to a TOML config file (defaults to the XDG config location)
	#[arg(long, global = true, env = "SKILLMATCH_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Search for jobs
	Search(SearchArgs),
	/// Show version information
	Version,
}

#[derive(Args, Debug)]
struct SearchArgs {
	/// A skill to match; repeat for several skills
	#[arg(short, long = "skill", required = true)]
	skills: Vec<String>,

	/// City, region or "Remote"
	#[arg(short, long)]
	location: String,

	/// Number of result pages to request (1-5)
	#[arg(short, long, default_value_t = 1)]
	pages: u32,

	/// Print results as JSON
	#[arg(long)]
	json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	if let Command::Version = cli.command {
		println!("skillmatch version: {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match &cli.config {
		Some(path) => skillmatch_config::load_config_with_file(path),
		None => skillmatch_config::load_config(),
	}
	.context("failed to load configuration")?;

	init_tracing(&config);

	match cli.command {
		Command::Search(args) => search(&config, args).await,
		Command::Version => Ok(()),
	}
}

fn init_tracing(config: &AppConfig) {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

async fn search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
	let request = SearchRequest {
		skills: args.skills,
		location: args.location,
		pages: args.pages,
		format: if args.json {
			OutputFormat::Json
		} else {
			OutputFormat::Text
		},
	};

	let output = run_search(&config.jsearch, request, ctrl_c()).await?;
	println!("{output}");
	Ok(())
}

async fn ctrl_c() {
	// Without a signal handler the search simply runs to completion.
	if tokio::signal::ctrl_c().await.is_err() {
		std::future::pending::<()>().await;
	}
}
