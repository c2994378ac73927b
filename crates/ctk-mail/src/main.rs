//! `ctk-mail` - compose, validate and send Centrika email from the command line.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod http;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use ctk_mail_core::{
    ContentTemplate, Draft, SendError, SendGate, Taxonomy, TemplateData, ValidationResult,
    Validator, build_subject,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use http::ApiClient;

const MAX_CODE_ATTEMPTS: usize = 3;

#[derive(Parser)]
#[command(name = "ctk-mail")]
#[command(about = "Centrika email subject builder and format checker")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Code tables to use instead of the built-in ones
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical subject line for a draft
    Subject {
        /// Draft JSON file
        draft: PathBuf,
    },
    /// Validate a draft
    Validate {
        /// Draft JSON file
        draft: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a subject line typed by hand
    CheckSubject {
        /// Subject line
        subject: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the code tables
    Taxonomy,
    /// Show the body template for an action code
    Template {
        /// Action code, e.g. MEETING
        action: String,
        /// Template fields (JSON) to render
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Validate, verify and send a draft
    Send {
        /// Draft JSON file
        draft: PathBuf,
        /// Verification code (prompted for when omitted)
        #[arg(long)]
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ctk_mail=info,ctk_mail_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())
        .await?
        .with_overrides(|key| std::env::var(key).ok());

    let loaded;
    let taxonomy = match cli.taxonomy.as_ref().or(config.taxonomy_path.as_ref()) {
        Some(path) => {
            loaded = Taxonomy::load(path)
                .with_context(|| format!("Failed to load code tables from {}", path.display()))?;
            &loaded
        }
        None => Taxonomy::standard(),
    };
    let validator = Validator::new(taxonomy);

    match cli.command {
        Commands::Subject { draft } => {
            let draft = read_draft(&draft).await?;
            println!("{}", build_subject(&draft));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { draft, json } => {
            let draft = read_draft(&draft).await?;
            report(&validator.validate(&draft), json)
        }
        Commands::CheckSubject { subject, json } => {
            report(&validator.check_subject_line(&subject), json)
        }
        Commands::Taxonomy => {
            print_taxonomy(taxonomy);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Template { action, data } => template(&action, data.as_deref()).await,
        Commands::Send { draft, code } => {
            let mut draft = read_draft(&draft).await?;
            if draft.sender.is_empty()
                && let Some(sender) = &config.default_sender
            {
                draft.sender.clone_from(sender);
            }
            send(&config, validator, &draft, code).await
        }
    }
}

async fn read_draft(path: &Path) -> anyhow::Result<Draft> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid draft in {}", path.display()))
}

fn report(result: &ValidationResult, json: bool) -> anyhow::Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_findings(result);
    }
    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_findings(result: &ValidationResult) {
    println!("{}", if result.is_valid { "Valid" } else { "Invalid" });
    for error in &result.errors {
        println!("  error: {error}");
    }
    for warning in &result.warnings {
        println!("  warning: {warning}");
    }
    for suggestion in &result.suggestions {
        println!("  suggestion: {suggestion}");
    }
}

fn print_taxonomy(taxonomy: &Taxonomy) {
    let tables = [
        ("Departments", &taxonomy.departments),
        ("Products", &taxonomy.products),
        ("Actions", &taxonomy.actions),
        ("Urgency", &taxonomy.urgencies),
    ];
    for (title, entries) in tables {
        println!("{title}:");
        for entry in entries {
            println!("  {:<12} {}", entry.code, entry.name);
        }
    }
    for group in &taxonomy.external_parties {
        println!("External parties ({}):", group.category.display_name());
        for entry in &group.entries {
            println!("  {:<12} {}", entry.code, entry.name);
        }
    }
}

async fn template(action: &str, data: Option<&Path>) -> anyhow::Result<ExitCode> {
    let Some(path) = data else {
        println!("{}", ContentTemplate::for_action(action).display_name());
        return Ok(ExitCode::SUCCESS);
    };

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data: TemplateData = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid template data in {}", path.display()))?;

    if let Err(errors) = data.validate() {
        for error in errors {
            eprintln!("  error: {error}");
        }
        return Ok(ExitCode::FAILURE);
    }
    println!("{}", data.render());
    Ok(ExitCode::SUCCESS)
}

async fn send(
    config: &Config,
    validator: Validator<'_>,
    draft: &Draft,
    mut code: Option<String>,
) -> anyhow::Result<ExitCode> {
    let api = ApiClient::new(&config.api_base_url, config.api_token.clone());
    let gate = SendGate::new(validator, api.clone(), api);

    let pending = match gate.begin(draft).await {
        Ok(pending) => pending,
        Err(SendError::Invalid(result)) => {
            print_findings(&result);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    if !pending.validation().warnings.is_empty() {
        print_findings(pending.validation());
    }

    let interactive = code.is_none();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    for _ in 0..MAX_CODE_ATTEMPTS {
        let attempt = match code.take() {
            Some(c) => c,
            None => {
                eprint!(
                    "Verification code sent to {} (empty line to resend): ",
                    pending.email().from
                );
                stdin.next_line().await?.unwrap_or_default()
            }
        };

        if attempt.trim().is_empty() {
            gate.resend(&pending).await?;
            continue;
        }

        match gate.confirm(&pending, &attempt).await {
            Ok(receipt) => {
                info!("Send confirmed at {}", receipt.sent_at);
                println!("{}", receipt.message);
                if let Some(id) = receipt.email_id {
                    println!("Email id: {id}");
                }
                return Ok(ExitCode::SUCCESS);
            }
            Err(SendError::CodeRejected) if interactive => {
                eprintln!("Invalid verification code.");
            }
            Err(e) => return Err(e.into()),
        }
    }

    bail!("No valid verification code after {MAX_CODE_ATTEMPTS} attempts")
}
