//! ✨ novabot CLI — chat with Nova, serve the site API, inspect config.
//!
//! Usage:
//!   novabot chat       — Start an interactive chat session
//!   novabot serve      — Run the HTTP gateway (chat + form relays)
//!   novabot topics     — List the topics the assistant can answer
//!   novabot status     — Show current configuration and health
//!   novabot onboard    — Create a default configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};

use novabot_core::config::Config;
use novabot_core::engine::{Engine, ReplyError};
use novabot_core::gateway;
use novabot_core::session::{Role, SessionStore};

#[derive(Parser)]
#[command(
    name = "novabot",
    version,
    about = "The Nova website assistant",
    long_about = "✨ novabot — the NovaStack in-page assistant as a standalone service.\n\nNo model calls. A fixed script, answered instantly, every time."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Run the HTTP gateway (chat endpoint + form relays)
    Serve,

    /// List the topics the assistant can answer
    Topics {
        /// Emit the catalogue as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configuration status and health
    Status,

    /// Create or reset the default configuration
    Onboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Chat) => cmd_chat().await?,
        Some(Commands::Serve) => cmd_serve().await?,
        Some(Commands::Topics { json }) => cmd_topics(json)?,
        Some(Commands::Status) => cmd_status()?,
        Some(Commands::Onboard) => cmd_onboard()?,
        None => cmd_chat().await?,
    }

    Ok(())
}

// ── Shared Setup ────────────────────────────────────────────────────

fn validate_config(config: &Config) -> Result<()> {
    if let Err(errors) = config.validate() {
        eprintln!("\n  \x1b[31m❌ Configuration errors:\x1b[0m");
        for e in &errors {
            eprintln!("     • {}", e);
        }
        eprintln!();
        anyhow::bail!("Fix the above {} error(s) in config.json", errors.len());
    }
    Ok(())
}

// ── Chat Command ────────────────────────────────────────────────────

async fn cmd_chat() -> Result<()> {
    let config = Config::load()?;
    validate_config(&config)?;

    let engine = Engine::new();
    let mut sessions = SessionStore::new();
    let session_key = "cli:direct";

    // Print header
    println!();
    println!("  ✨ novabot v{}", env!("CARGO_PKG_VERSION"));
    println!("  Topics: {} | Session: {}", engine.topics().len(), session_key);
    println!();
    println!("  Type your message, or /quit to exit.");
    println!("  ─────────────────────────────────────");
    println!();

    // Seed the transcript with the greeting, like the site widget does.
    let transcript = sessions.get_or_create(session_key);
    transcript.push(Role::Assistant, &config.assistant.greeting);
    println!("  \x1b[32m{}\x1b[0m\n", config.assistant.greeting);

    // Interactive loop
    let stdin = io::stdin();
    loop {
        print!("  \x1b[36m>\x1b[0m ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        // Handle commands
        match input {
            "/quit" | "/exit" | "/q" => {
                println!("  Goodbye! 👋");
                break;
            }
            "/clear" => {
                sessions.get_or_create(session_key).clear();
                println!("  Session cleared.");
                continue;
            }
            "/topics" => {
                cmd_topics(false)?;
                continue;
            }
            _ => {}
        }

        // Transcript bookkeeping is ours, not the engine's.
        match engine.reply(input) {
            Ok(reply) => {
                let transcript = sessions.get_or_create(session_key);
                transcript.push(Role::User, input);
                transcript.push(Role::Assistant, reply);

                // Typing effect, matching the site widget's delay.
                if config.assistant.typing_delay_ms > 0 {
                    tokio::time::sleep(std::time::Duration::from_millis(
                        config.assistant.typing_delay_ms,
                    ))
                    .await;
                }
                println!("\n  \x1b[32m{}\x1b[0m\n", reply);
            }
            Err(ReplyError::EmptyInput) => {
                // Unreachable given the is_empty() guard above, but the
                // engine contract says reject, so surface it.
                eprintln!("  \x1b[31mError: empty message\x1b[0m\n");
            }
        }
    }

    Ok(())
}

// ── Serve Command ───────────────────────────────────────────────────

async fn cmd_serve() -> Result<()> {
    let config = Config::load()?;
    validate_config(&config)?;

    println!();
    println!("  ✨ novabot gateway starting...");
    println!("  Address: http://{}", config.gateway.addr());
    println!("  Press Ctrl+C for graceful shutdown.");
    println!("  ─────────────────────────────────────");

    gateway::run(&config).await?;

    tracing::info!("Gateway stopped");
    println!("  ✅ Shutdown complete.");
    Ok(())
}

// ── Topics Command ──────────────────────────────────────────────────

fn cmd_topics(json: bool) -> Result<()> {
    let engine = Engine::new();

    if json {
        let topics: Vec<serde_json::Value> = engine
            .topics()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id.as_str(),
                    "triggers": t.triggers,
                    "subTopics": t.sub_topics.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&topics)?);
        return Ok(());
    }

    println!();
    for topic in engine.topics() {
        println!("  📚 {}", topic.id.as_str());
        println!("     Triggers: {}", topic.triggers.join(", "));
        if !topic.sub_topics.is_empty() {
            let subs: Vec<&str> = topic.sub_topics.iter().map(|s| s.id.as_str()).collect();
            println!("     Sub-topics: {}", subs.join(", "));
        }
    }
    println!();
    Ok(())
}

// ── Status Command ──────────────────────────────────────────────────

fn cmd_status() -> Result<()> {
    let config_path = Config::default_path();
    let config = Config::load()?;
    let engine = Engine::new();

    println!();
    println!("  ✨ novabot status");
    println!("  ─────────────────────────────────────");

    // Config file
    if config_path.exists() {
        println!("  Config:    {}", config_path.display());
    } else {
        println!("  Config:    defaults (run `novabot onboard` to customize)");
    }

    // Gateway
    println!("  Gateway:   http://{}", config.gateway.addr());

    // Form webhooks
    let mark = |configured: bool| if configured { "✅" } else { "❌ not configured" };
    println!(
        "  Contact:   {}",
        mark(!config.forms.contact_webhook_url.is_empty())
    );
    println!(
        "  Audit:     {}",
        mark(!config.forms.audit_webhook_url.is_empty())
    );

    // Knowledge base
    println!("  Topics:    {} loaded", engine.topics().len());

    println!();
    Ok(())
}

// ── Onboard Command ─────────────────────────────────────────────────

fn cmd_onboard() -> Result<()> {
    let path = Config::write_default_template()?;
    println!();
    println!("  ✅ Configuration created at:");
    println!("     {}", path.display());
    println!();
    println!("  Next steps:");
    println!("  1. Edit the config file and add your form webhook URLs");
    println!("  2. Run `novabot chat` to talk to Nova, or `novabot serve` for the API");
    println!();
    Ok(())
}
