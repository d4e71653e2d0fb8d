//! GrowthOS: growth tracking audit CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use growthos::audit::patterns::CRITICAL_EVENTS;
use growthos::audit::Auditor;
use growthos::config::load_effective_config;
use growthos::init::{init_project, InitOptions, InitSummary};
use growthos::reporter::{AuditReport, ConsoleReporter, JsonReporter};
use growthos::{GitHubClient, RepoRef};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Growth in a Box - Analytics, A/B tests & referrals for indie hackers
#[derive(Parser, Debug)]
#[command(name = "growthos")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: search .growthosrc.json in current dir and parents)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a GitHub repo for missing growth events
    Audit {
        /// GitHub repo (e.g. username/repo)
        repo: String,

        /// Save audit report under this name
        #[arg(long, short)]
        output: Option<String>,

        /// Generate shareable score for social media
        #[arg(long)]
        share: bool,

        /// Print the report as JSON instead of console text
        #[arg(long)]
        json: bool,

        /// Show score breakdown and recommendations
        #[arg(long, short)]
        verbose: bool,
    },

    /// Initialize GrowthOS in your project
    Init {
        /// PostHog API key
        #[arg(long, short, value_name = "POSTHOG_KEY")]
        key: Option<String>,

        /// Skip interactive setup
        #[arg(long)]
        skip_setup: bool,

        /// Directory to initialize (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "❌".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    match args.command {
        Commands::Audit {
            ref repo,
            ref output,
            share,
            json,
            verbose,
        } => run_audit(&args, repo, output.as_deref(), share, json, verbose)
            .context("Audit failed")?,
        Commands::Init {
            ref key,
            skip_setup,
            ref dir,
        } => run_init(key.clone(), skip_setup, dir.as_deref()).context("Init failed")?,
    }

    Ok(ExitCode::SUCCESS)
}

fn run_audit(
    args: &Args,
    repo: &str,
    output: Option<&str>,
    share: bool,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_effective_config(&cwd, args.config.as_deref())?;
    let client = GitHubClient::from_config(&config)?;

    let mut reporter = ConsoleReporter::new();
    if verbose {
        reporter = reporter.verbose();
    }

    if !json {
        reporter.print_scanning(&RepoRef::parse(repo));
    }

    let outcome = Auditor::new(client).audit(repo)?;
    let report = AuditReport::new(&outcome.score);

    // Announced as soon as the report object exists, ahead of the score block
    if let Some(name) = output {
        let file_name = AuditReport::file_name(name);
        if json {
            eprintln!("{}: Report saved: {}", "Info".blue(), file_name);
        } else {
            reporter.print_report_saved(&file_name);
        }
    }

    if json {
        println!("{}", JsonReporter::new().pretty().report(&report));
    } else {
        reporter.report(&outcome, share);
    }

    Ok(())
}

fn run_init(key: Option<String>, skip_setup: bool, dir: Option<&Path>) -> Result<()> {
    println!("{}", "🚀 Initializing GrowthOS...".blue());

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let options = InitOptions {
        key,
        skip_setup,
        dir: dir.map(Path::to_path_buf).unwrap_or(cwd),
    };

    let stdin = io::stdin();
    let summary = init_project(&options, &mut stdin.lock(), &mut io::stdout())?;
    print_init_summary(&options, &summary);

    println!(
        "{}",
        "\n✅ GrowthOS ready! Check your dashboard in <5min".green()
    );
    Ok(())
}

fn print_init_summary(options: &InitOptions, summary: &InitSummary) {
    if summary.created {
        println!("   Created {}", summary.config_path.display());
        if !summary.has_key {
            println!(
                "   {}",
                "No PostHog key yet: add \"posthogKey\" to the config when you have one".dimmed()
            );
        }
    } else {
        eprintln!(
            "{}: {} already exists; remove it first to re-run setup",
            "Warning".yellow(),
            summary.config_path.display()
        );
    }

    match summary.analytics {
        Some(ref stack) if stack.has_analytics() => {
            println!("   Analytics SDK detected: {}", stack.found.join(", ").green());
        }
        Some(_) => {
            println!(
                "   {} Install one with: {}",
                "No analytics SDK in package.json.".yellow(),
                "npm install posthog-js".bold()
            );
        }
        None => {
            println!(
                "   {}",
                format!("No package.json in {}", options.dir.display()).dimmed()
            );
        }
    }

    println!("\n   {}", "Track these events first:".bold());
    for event in CRITICAL_EVENTS {
        println!("   • {}", event);
    }
}
