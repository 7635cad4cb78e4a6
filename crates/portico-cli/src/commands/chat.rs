//! Interactive chat session.
//!
//! A thin presentation layer: it feeds user intents into the orchestrator
//! and renders the event stream. All state lives behind the orchestrator.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use portico_application::{ConnectRequest, SessionOrchestrator};
use portico_core::session::{MessageRole, SessionEvent, Severity};
use portico_interaction::config::load_config_or_default;
use portico_interaction::portal::SimulatedPortalClient;
use portico_interaction::registry::ModelInvocationRegistry;

const SAMPLE_PROMPTS: [&str; 4] = [
    "What is the capital of the UK?",
    "Explain machine learning in simple terms",
    "Write a Python function to calculate fibonacci numbers",
    "What are the benefits of cloud computing?",
];

#[derive(Args)]
pub struct ChatArgs {
    /// Disable simulated backend latency
    #[arg(long)]
    pub no_latency: bool,
    /// Model id to start with (defaults to the configured default model)
    #[arg(long)]
    pub model: Option<String>,
}

pub async fn run(args: ChatArgs) -> Result<()> {
    let config = load_config_or_default();
    let simulate_latency = config.simulate_latency && !args.no_latency;

    let mut portal = SimulatedPortalClient::new();
    let mut registry = ModelInvocationRegistry::bedrock_simulation();
    if !simulate_latency {
        portal = portal.without_latency();
        registry = registry.without_latency();
    }

    let orchestrator = Arc::new(
        SessionOrchestrator::new(Arc::new(portal), Arc::new(registry))
            .with_export_prefix(config.export_prefix),
    );
    orchestrator
        .change_model(args.model.unwrap_or(config.default_model))
        .await;

    let mut events = orchestrator.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            render_event(&event);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    login(&orchestrator, &mut lines).await?;

    println!();
    println!("Type a prompt, or one of: /model <id>, /clear, /export, /quit");
    println!("Sample prompts:");
    for sample in SAMPLE_PROMPTS {
        println!("  - {sample}");
    }

    loop {
        let Some(line) = read_line(&mut lines, "> ").await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/clear" => orchestrator.clear_history().await,
            "/export" => {
                if let Some(export) = orchestrator.export_history().await? {
                    std::fs::write(&export.filename, &export.json)
                        .with_context(|| format!("writing {}", export.filename))?;
                    println!("Saved {}", export.filename);
                }
            }
            command if command.starts_with("/model") => {
                let id = command.trim_start_matches("/model").trim();
                if id.is_empty() {
                    println!("Current model: {}", orchestrator.current_model().await);
                } else {
                    orchestrator.change_model(id).await;
                    println!("Model set to {id}");
                }
            }
            prompt => {
                if let Err(err) = orchestrator.send(prompt).await {
                    eprintln!("send failed: {err}");
                }
            }
        }
    }

    orchestrator.disconnect().await;
    Ok(())
}

async fn login(
    orchestrator: &Arc<SessionOrchestrator>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<()> {
    loop {
        let Some(username) = read_line(lines, "Username: ").await? else {
            bail!("stdin closed before login completed");
        };
        let Some(password) = read_line(lines, "Password: ").await? else {
            bail!("stdin closed before login completed");
        };
        let Some(account_id) = read_line(lines, "Account ID (12 digits): ").await? else {
            bail!("stdin closed before login completed");
        };
        let Some(region) = read_line(lines, "Region [us-east-1]: ").await? else {
            bail!("stdin closed before login completed");
        };
        let region = if region.trim().is_empty() {
            "us-east-1".to_string()
        } else {
            region
        };

        let request = ConnectRequest {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
            account_id: account_id.trim().to_string(),
            region: region.trim().to_string(),
        };
        // Failure details arrive through the event stream; just retry.
        if orchestrator.connect(request).await.is_ok() {
            return Ok(());
        }
    }
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

fn render_event(event: &SessionEvent) {
    match event {
        SessionEvent::MessageAppended { message } => {
            let speaker = match message.role {
                MessageRole::User => "You",
                MessageRole::Assistant => message.model.as_deref().unwrap_or("Assistant"),
                MessageRole::Error => "System",
            };
            println!("[{speaker}] {}", message.content);
            if let (Some(input), Some(output)) = (message.input_tokens, message.output_tokens) {
                println!("  ({input} in, {output} out tokens)");
            }
        }
        SessionEvent::ConnectionStateChanged { detail, .. } => {
            println!("-- {detail}");
        }
        SessionEvent::Notification { message, severity } => {
            let tag = match severity {
                Severity::Success => "ok",
                Severity::Error => "error",
                Severity::Warning => "warn",
                Severity::Info => "info",
            };
            eprintln!("[{tag}] {message}");
        }
        SessionEvent::ConnectBusy { .. } | SessionEvent::SendBusy { .. } => {}
        SessionEvent::HistoryCleared => {}
    }
}
