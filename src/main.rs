//! Kuuki CLI
//!
//! Usage:
//!   kuuki --text "それは嘘だ"            # Single evaluation
//!   kuuki --interactive                  # Read utterances from stdin
//!   kuuki --serve                        # HTTP + WebSocket authority
//!   kuuki --text "text" --json           # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use kuuki::core::{run_server, Atmosphere, Heard};
use kuuki::types::{AtmosphereConfig, ConversationalState, StateRecord};
use kuuki::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "kuuki",
    version = VERSION,
    about = "Kuuki - turn live conversation into a word-particle atmosphere",
    long_about = "Kuuki reads recognized speech and microphone level and keeps a\n\
                  conversational tension model, a keyword classifier, a silence\n\
                  escalator and a word-particle simulation for a renderer to draw.\n\n\
                  Modes:\n  \
                  --interactive  Read utterances from stdin (default)\n  \
                  --serve        HTTP + WebSocket state authority\n\n\
                  States:\n  \
                  UNKNOWN - Calm, tension <= 2\n  \
                  ALIGNED - Conversation flowing, tension <= 8\n  \
                  SPLIT   - Conflict, tension > 8"
)]
struct Args {
    /// Text to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read utterances from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP + WebSocket server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:4567")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show classification and spawn side
    #[arg(long)]
    verbose: bool,

    /// Fixed random seed for particle jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Screen width in pixels
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Screen height in pixels
    #[arg(long, default_value_t = 1080.0)]
    height: f64,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    tick_hz: u32,

    /// Danger word (repeatable); replaces the built-in list
    #[arg(long = "danger-word")]
    danger_words: Vec<String>,
}

impl Args {
    fn config(&self) -> AtmosphereConfig {
        let mut config = AtmosphereConfig {
            width: self.width,
            height: self.height,
            tick_hz: self.tick_hz,
            seed: self.seed,
            ..AtmosphereConfig::default()
        };
        if !self.danger_words.is_empty() {
            config.danger_words = self.danger_words.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kuuki=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = args.config().validate() {
        eprintln!("{}", e);
        std::process::exit(2);
    }

    if args.serve {
        run_serve(&args).await;
    } else if let Some(ref text) = args.text {
        run_single(text, &args);
    } else {
        run_interactive(&args);
    }
}

/// Run single text evaluation
fn run_single(text: &str, args: &Args) {
    let mut atmosphere = Atmosphere::new(args.config());
    match atmosphere.hear(text) {
        Some(heard) => print_heard(&heard, args),
        None => eprintln!("Nothing to evaluate"),
    }
}

/// Run interactive mode
fn run_interactive(args: &Args) {
    let mut atmosphere = Atmosphere::new(args.config());

    print_header(args.no_color);
    println!("Type what was said and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let record = atmosphere.reading();
        print!("[{}] > ", state_label(record.state));
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!(
                "\nSession ended. Utterances: {}, words spawned: {}",
                atmosphere.tension().utterance_count(),
                atmosphere.particles().spawned()
            );
            break;
        }

        if let Some(heard) = atmosphere.hear(line) {
            print_heard(&heard, args);
        }
    }
}

fn print_heard(heard: &Heard, args: &Args) {
    if args.json {
        #[derive(serde::Serialize)]
        struct HeardOutput<'a> {
            state: &'a StateRecord,
            config: &'a kuuki::types::WordSpawnConfig,
            side: kuuki::types::SpeakerSide,
        }
        let out = HeardOutput { state: &heard.record, config: &heard.config, side: heard.side };
        match serde_json::to_string(&out) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("JSON error: {}", e),
        }
        return;
    }

    let record = &heard.record;
    println!(
        "{} {} | tension={:.2} | split={:.2}",
        record.state.emoji(),
        state_label(record.state),
        record.tension,
        record.split_degree
    );
    if args.verbose {
        let cfg = &heard.config;
        println!(
            "  └─ style={} color={:?} side={:?} flash={} shake={:.1}",
            cfg.style, cfg.color, heard.side, cfg.flash, cfg.shake
        );
    }
}

fn state_label(state: ConversationalState) -> colored::ColoredString {
    let name = state.to_string();
    match state {
        ConversationalState::Unknown => name.bright_black(),
        ConversationalState::Aligned => name.yellow(),
        ConversationalState::Split => name.red().bold(),
    }
}

fn print_header(no_color: bool) {
    let title = format!("  Kuuki v{} - Interactive", VERSION);
    println!("========================================");
    if no_color {
        println!("{}", title);
    } else {
        println!("{}", title.bold());
    }
    println!("========================================");
    println!();
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    if let Err(e) = run_server(&args.addr, args.config()).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
