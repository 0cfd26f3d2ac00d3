use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use parley_core::{CliErrorDisplay, ParleyConfig, ParleyError, UserId};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::{cmd_ask, cmd_config, cmd_groups, cmd_history, cmd_send, cmd_users, HistoryFormat};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "parley")]
#[command(version = VERSION)]
#[command(about = "Parley - terminal messaging client with an AI assistant")]
#[command(long_about = r#"
Parley talks to a chat backend for contacts, groups and conversation
history, and to an OpenAI-compatible completion endpoint for the AI
assistant.

Use 'parley users' to list contacts, 'parley history <id>' to read a
conversation and 'parley send <id> <message>' to reply. The interactive
client is 'parley-tui'.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List contacts")]
    Users {
        #[arg(short, long, help = "Only show contacts whose name contains this")]
        search: Option<String>,
    },

    #[command(about = "List groups")]
    Groups,

    #[command(about = "Show the conversation with a contact")]
    History {
        #[arg(help = "Contact id")]
        peer: UserId,

        #[arg(short, long, help = "Only show messages containing this")]
        search: Option<String>,

        #[arg(
            short,
            long,
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: HistoryFormat,
    },

    #[command(about = "Send a message to a contact")]
    Send {
        #[arg(help = "Contact id")]
        peer: UserId,

        #[arg(help = "Message text")]
        message: String,
    },

    #[command(about = "Ask the AI assistant a single question")]
    Ask {
        #[arg(help = "Prompt text")]
        prompt: String,
    },

    #[command(about = "Show the effective configuration")]
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ParleyError>() {
                Some(err) => eprintln!("{}: {}", "Error".red().bold(), CliErrorDisplay::new(err)),
                None => eprintln!("{}: {:#}", "Error".red().bold(), e),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ParleyConfig::load()?;
    debug!(
        backend = config.base_url(),
        user = config.current_user_id(),
        "Loaded configuration"
    );

    match cli.command {
        Commands::Users { search } => cmd_users(&config, search.as_deref()).await,
        Commands::Groups => cmd_groups(&config).await,
        Commands::History {
            peer,
            search,
            format,
        } => cmd_history(&config, peer, search.as_deref(), format).await,
        Commands::Send { peer, message } => cmd_send(&config, peer, &message).await,
        Commands::Ask { prompt } => cmd_ask(&config, &prompt).await,
        Commands::Config => cmd_config(&config),
    }
}
