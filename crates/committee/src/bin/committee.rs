//! Investment Committee CLI
//!
//! An interactive command-line interface for running committee debates.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables
//! export OPENAI_API_KEY="sk-..."
//! export TAVILY_API_KEY="tvly-..."
//!
//! # Run the committee
//! cargo run --bin committee -p committee
//! ```

use clap::Parser;
use committee::search::{EvidenceSearch, TavilyClient};
use committee::{CommitteeConfig, DebateSession, TurnRole};
use committee_llm::LlmProvider;
use committee_llm::providers::{OpenAIConfig, OpenAIProvider};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Multi-agent investment committee debates from the command line
#[derive(Debug, Parser)]
#[command(name = "committee", version, about)]
struct Cli {
    /// OpenAI-compatible API key
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_api_key: String,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_API_BASE")]
    openai_api_base: Option<String>,

    /// Reasoning model identifier
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// Tavily search API key
    #[arg(long, env = "TAVILY_API_KEY")]
    tavily_api_key: String,

    /// Analyze a single symbol and exit instead of entering the prompt loop
    #[arg(long)]
    symbol: Option<String>,
}

fn print_banner() {
    println!("💼 INVESTMENT COMMITTEE SYSTEM");
    println!("{}", "=".repeat(50));
    println!("🐂 Bull Agent: Finds reasons to BUY");
    println!("🐻 Bear Agent: Finds reasons to AVOID");
    println!("🎯 Chairman: Makes final decision");
    println!("{}", "=".repeat(50));
}

async fn analyze(
    symbol: &str,
    provider: &Arc<dyn LlmProvider>,
    search: &Arc<dyn EvidenceSearch>,
    config: &CommitteeConfig,
) -> anyhow::Result<()> {
    println!("\n📈 ANALYZING: {}", symbol.trim().to_uppercase());
    println!("{}", "-".repeat(30));

    let mut session = DebateSession::new(
        symbol,
        Arc::clone(provider),
        Arc::clone(search),
        config.clone(),
    )?;

    while let Some(turn) = session.next_turn().await? {
        let label = match (turn.role, turn.speaker) {
            (TurnRole::Agent, Some(role)) => format!("[{}]", role.label()),
            _ => "[COMMITTEE]".to_string(),
        };
        println!("\n{label}\n{}", turn.content);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "warn,committee=info".to_string()))
        .init();

    let cli = Cli::parse();

    print_banner();

    let mut openai_config = OpenAIConfig::new(cli.openai_api_key);
    if let Some(api_base) = cli.openai_api_base {
        openai_config = openai_config.with_api_base(api_base);
    }
    let provider: Arc<dyn LlmProvider> = Arc::new(OpenAIProvider::with_config(openai_config)?);
    let search: Arc<dyn EvidenceSearch> = Arc::new(TavilyClient::new(cli.tavily_api_key)?);

    let mut config = CommitteeConfig::default().with_env_model();
    if let Some(model) = cli.model {
        config.model = model;
    }
    config.validate()?;

    println!("🔄 Initializing investment committee...");
    println!("  Model: {}", config.model);
    println!("✅ Committee ready!\n");

    // One-shot mode
    if let Some(symbol) = cli.symbol {
        analyze(&symbol, &provider, &search, &config).await?;
        return Ok(());
    }

    // Interactive mode
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("Enter stock symbol (or 'quit' to exit): ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\n👋 Goodbye! Happy investing!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            println!("Please enter a valid stock symbol.");
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("\n👋 Goodbye! Happy investing!");
            break;
        }

        if let Err(e) = analyze(input, &provider, &search, &config).await {
            eprintln!("\n❌ Error: {e}");
            eprintln!("Please try again with a different stock symbol.");
        }

        println!("\n{}", "=".repeat(50));
    }

    Ok(())
}
