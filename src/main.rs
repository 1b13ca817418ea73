//! Study Buddy - terminal shell
//!
//! Ask questions typed, spoken, or taken from a PDF, from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use studybuddy::config::Config;
use studybuddy::{audio, AskOutcome, BuddyError, Session};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Answering service base URL (overrides config)
    #[arg(long)]
    server: Option<String>,

    /// Do not speak answers automatically
    #[arg(long)]
    no_speak: bool,

    /// Use this config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// List audio input devices and exit
    #[arg(long)]
    list_devices: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask one question and print the response
    Ask {
        /// Question text
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print the text extracted from a PDF
    Extract {
        file: PathBuf,

        /// Submit the extracted text as the prompt
        #[arg(long)]
        ask: bool,
    },
}

fn init_logging(verbose: bool, config: &Config) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(server) = &args.server {
        config.server_url = server.clone();
    }
    if args.no_speak {
        config.speak_answers = false;
    }

    init_logging(args.verbose, &config);
    info!("📚 Study Buddy v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.list_devices {
        for (i, name) in audio::list_input_devices()?.iter().enumerate() {
            println!("[{}] {}", i, name);
        }
        return Ok(());
    }

    let session = Session::from_config(&config).await;

    match args.command {
        Some(Command::Ask { words }) => {
            session.edit_prompt(words.join(" "))?;
            submit(&session).await?;
        }
        Some(Command::Extract { file, ask }) => {
            session.load_document(&file).await?;
            print!("{}", session.snapshot()?.prompt());
            if ask {
                submit(&session).await?;
            }
        }
        None => run_shell(&session).await?,
    }

    Ok(())
}

async fn submit(session: &Session) -> Result<()> {
    println!("Processing...");
    let outcome = session.submit().await?;
    println!("Response:\n{}", outcome.display_text());
    if matches!(outcome, AskOutcome::TransportFailed) {
        warn!("Is the answering service running?");
    }
    Ok(())
}

const HELP: &str = "\
Type a line to make it the prompt. Commands:
  /ask           send the prompt
  /speak         append speech to the prompt
  /pdf <path>    replace the prompt with a PDF's text
  /read          speak the response
  /email <addr>  set the email address
  /send          email the prompt and response
  /show          show prompt, response and status
  /quit          exit";

async fn run_shell(session: &Session) -> Result<()> {
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if let Err(e) = handle_line(session, &line).await {
            match e.downcast_ref::<BuddyError>() {
                Some(err) => println!("⚠️ {}", err),
                None => return Err(e),
            }
        }
        if line.trim() == "/quit" {
            break;
        }
    }
    Ok(())
}

async fn handle_line(session: &Session, line: &str) -> Result<()> {
    let (cmd, rest) = match line.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (line.trim(), ""),
    };

    match cmd {
        "/ask" => submit(session).await?,
        "/speak" => {
            println!("🎙️ Listening...");
            match session.capture_speech().await? {
                Some(text) => println!("📝 Heard: {}", text),
                None => println!("🔇 Nothing heard"),
            }
        }
        "/pdf" => {
            session.load_document(Path::new(rest)).await?;
            println!("📄 Prompt replaced ({} chars)", session.snapshot()?.prompt().len());
        }
        "/read" => session.read_response().await?,
        "/email" => session.set_email_address(rest)?,
        "/send" => println!("{}", session.send_email().await?),
        "/show" => {
            let state = session.snapshot()?;
            println!("Prompt:\n{}", state.prompt());
            println!("Response:\n{}", state.response());
            if let Some(err) = state.request().error_message() {
                println!("Error: {}", err);
            }
            if !state.email().address.is_empty() {
                println!("Email: {} {}", state.email().address, state.email().status);
            }
        }
        "/quit" => {}
        "/help" => println!("{}", HELP),
        _ => session.edit_prompt(line)?,
    }
    Ok(())
}
