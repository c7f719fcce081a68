use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use discovery_coach::{
    config::Config,
    gemini::GeminiClient,
    session::{RoleplaySession, ScenarioSource, StakeholderRole},
    tracker::CoverageTracker,
};

/// Practice tool for discovery-workshop interviews
#[derive(Parser, Debug)]
#[command(name = "discovery-coach", version, about)]
struct Cli {
    /// Stakeholder role to interview: agent_owner or business_owner
    #[arg(long, default_value = "business_owner")]
    role: String,

    /// Generate a fresh scenario instead of picking from the catalog
    #[arg(long)]
    generate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    let role: StakeholderRole = match cli.role.parse() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        role = %role,
        "Discovery Coach starting..."
    );

    let model = match GeminiClient::new(&config.gemini, config.request.clone()) {
        Ok(c) => {
            info!(base_url = %config.gemini.base_url, model = %config.gemini.model, "Gemini client initialized");
            Arc::new(c)
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize Gemini client");
            return Err(e.into());
        }
    };

    let mut session = RoleplaySession::new(model.clone());
    let mut tracker = CoverageTracker::new(model);

    let source = if cli.generate {
        ScenarioSource::Generate
    } else {
        ScenarioSource::Catalog
    };

    if let Err(e) = run(&mut session, &mut tracker, role, source).await {
        error!(error = %e, "Session error");
        return Err(e);
    }

    info!("Session complete");
    Ok(())
}

/// Interactive loop: each non-command line is a question for the persona,
/// answered in character and then scored with coaching feedback.
async fn run(
    session: &mut RoleplaySession,
    tracker: &mut CoverageTracker,
    role: StakeholderRole,
    source: ScenarioSource,
) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    let intro = session.start(role, source).await?;

    let mut banner = String::new();
    banner.push_str("=== Discovery Practice Session ===\n\n");
    banner.push_str(&format!("Scenario: {}\n\n", session.scenario_brief()));
    banner.push_str(&format!("{}: {}\n\n", session.role_display(), intro));
    banner.push_str("Ask questions to uncover the details. Commands: /coverage /summary /quit\n\n");
    stdout.write_all(banner.as_bytes()).await?;
    stdout.flush().await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        // EOF reached
        if bytes_read == 0 {
            info!("EOF received, ending session");
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" => break,
            "/coverage" => {
                let text = format!("\n{}\n\n", tracker.coverage_summary_text());
                stdout.write_all(text.as_bytes()).await?;
            }
            "/summary" => {
                let summary = tracker.summarize(session.transcript()).await?;
                stdout
                    .write_all(format!("\n{}\n\n", summary).as_bytes())
                    .await?;
            }
            question => {
                let answer = session.respond(question).await?;
                stdout
                    .write_all(format!("\n{}: {}\n", session.role_display(), answer).as_bytes())
                    .await?;

                let verdict = tracker
                    .evaluate(question, &answer, session.transcript())
                    .await?;
                let coaching = format!(
                    "\n[Coach] Score: {}/5 | {}\n[Coach] Try next: {}\n\n",
                    verdict.score, verdict.improvement, verdict.follow_up_suggestion
                );
                stdout.write_all(coaching.as_bytes()).await?;
            }
        }
        stdout.flush().await?;
    }

    // Closing summary, skipped when no questions were asked
    if tracker.stats().questions > 0 {
        let summary = tracker.summarize(session.transcript()).await?;
        stdout
            .write_all(format!("\n=== Session Summary ===\n\n{}\n", summary).as_bytes())
            .await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        discovery_coach::config::LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        discovery_coach::config::LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
