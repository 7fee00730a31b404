//! ConsentOS CLI
//!
//! Usage:
//!   consentos --text "🟠🧱 hold on"          # Single message
//!   consentos --interactive                  # Read messages from stdin
//!   consentos --text "🆘" --json             # JSON output
//!   consentos --text "..." --user-terminated --session-inactive

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use tracing::error;
use tracing_subscriber::EnvFilter;

use consentos::core::{ModeTemplateResponder, ModeratorConfig, ResponseModerator, SignalTokenizer};
use consentos::types::{MemoryContext, ModerationOutcome, SessionContext};
use consentos::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "consentos",
    version = VERSION,
    about = "ConsentOS - Moderate responses by consent signals",
    long_about = "ConsentOS reads symbolic consent signals (intensity, pace, boundary,\n\
                  emotion, meta, safety) from each message, scores risk, and\n\
                  enforces the behavioral invariants on the delivered response.\n\n\
                  Modes:\n  \
                  EXPLORE    - Risk 0-1\n  \
                  DEEPEN     - Risk 2\n  \
                  INTEGRATE  - Risk 3\n  \
                  REGULATE   - Risk 4\n  \
                  CRISIS     - Risk 5 or a safety override"
)]
struct Args {
    /// Message to moderate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read messages from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show signal breakdown and debug logs
    #[arg(long)]
    verbose: bool,

    /// Moderator config (JSON)
    #[arg(long)]
    config: Option<String>,

    /// Responder timeout in milliseconds (overrides config)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Session is no longer active
    #[arg(long)]
    session_inactive: bool,

    /// The user ended the session
    #[arg(long)]
    user_terminated: bool,

    /// Witness mode already active
    #[arg(long)]
    witness_mode: bool,

    /// Ancestral memory patterns exist for this session
    #[arg(long)]
    ancestral_patterns: bool,

    /// Ancestral patterns are integrated into the response
    #[arg(long)]
    ancestral_integrated: bool,
}

impl Args {
    fn session(&self) -> SessionContext {
        SessionContext {
            session_active: !self.session_inactive,
            user_terminated: self.user_terminated,
            witness_mode_active: self.witness_mode,
            memory: MemoryContext {
                has_ancestral_patterns: self.ancestral_patterns,
                ancestral_integrated: self.ancestral_integrated,
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = match &args.config {
        Some(path) => match ModeratorConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path, error = %e, "Config load failed");
                return ExitCode::FAILURE;
            }
        },
        None => ModeratorConfig::default(),
    };
    if let Some(ms) = args.timeout_ms {
        config = config.with_timeout_ms(ms);
    }

    let moderator = ResponseModerator::with_config(Arc::new(ModeTemplateResponder::new()), config);

    if args.interactive {
        run_interactive(&moderator, &args).await
    } else if let Some(ref text) = args.text {
        run_single(&moderator, text, &args).await
    } else {
        // Default to interactive if no mode specified
        run_interactive(&moderator, &args).await
    }
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Moderate a single message
async fn run_single(moderator: &ResponseModerator, text: &str, args: &Args) -> ExitCode {
    match moderator.moderate(text, &args.session()).await {
        Ok(outcome) => {
            print_outcome(&outcome, args);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", rejection_line(&e.to_string(), args.no_color));
            ExitCode::from(2)
        }
    }
}

/// Interactive mode
async fn run_interactive(moderator: &ResponseModerator, args: &Args) -> ExitCode {
    print_header(args.no_color);
    println!("Type a message with consent signals and press Enter. Type 'quit' to exit.");
    println!();

    let session = args.session();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut delivered = 0usize;

    loop {
        print!("> ");
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
            println!("\nSession ended. Messages: {}", delivered);
            break;
        }
        if line.is_empty() {
            continue;
        }

        match moderator.moderate(line, &session).await {
            Ok(outcome) => {
                delivered += 1;
                print_outcome(&outcome, args);
            }
            Err(e) => {
                // A rejected session stays rejected for every later message
                eprintln!("{}", rejection_line(&e.to_string(), args.no_color));
                return ExitCode::from(2);
            }
        }
        println!();
    }

    ExitCode::SUCCESS
}

fn print_outcome(outcome: &ModerationOutcome, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "Failed to serialize outcome"),
        }
    } else if args.verbose {
        print_verbose(outcome, args.no_color);
    } else if args.no_color {
        println!("{}", outcome.to_parseable_string());
        println!("{}", outcome.final_text);
    } else {
        println!("{}", outcome.to_terminal_string());
    }
}

/// Print signal breakdown
fn print_verbose(outcome: &ModerationOutcome, no_color: bool) {
    let tokenizer = SignalTokenizer::new();
    let tokens = tokenizer.tokenize(outcome.state.raw_text());
    let title = |s: &str| {
        if no_color {
            s.to_string()
        } else {
            s.bold().to_string()
        }
    };

    println!("{}", title("Signals"));
    if tokens.is_empty() {
        println!("  (none, defaults applied)");
    }
    for token in &tokens {
        let channel = format!("{:?}", token.signal.channel());
        println!("  {:<3} {:<10} {:<18} @{}", token.glyph, channel, token.signal.label(), token.offset);
    }

    println!("{}", title("State"));
    println!("  {}", outcome.state.summary());

    println!("{}", title("Scoring"));
    println!("  risk={} mode={}", outcome.scoring.risk_level, outcome.scoring.response_mode);
    println!("  {}", outcome.scoring.rationale);
    for suggestion in &outcome.scoring.suggestions {
        println!("  - {}", suggestion);
    }

    println!("{}", title("Invariants"));
    println!("  continuity:               {:?}", outcome.report.continuity);
    match &outcome.report.ancestral_presence {
        Some(o) => println!("  ancestral presence:       {:?}", o),
        None => println!("  ancestral presence:       (not evaluated)"),
    }
    println!("  responsibility circuit:   {:?}", outcome.report.responsibility_circuit);
    println!("  unconditional witnessing: {:?}", outcome.report.unconditional_witnessing);
    if let Some(recheck) = &outcome.report.witnessing_recheck {
        println!("  after rewrite:            {:?}", recheck);
    }

    println!("{}", title("Trail"));
    let stages: Vec<String> = outcome.stages.iter().map(|s| s.to_string()).collect();
    println!("  {}", stages.join(" → "));
    for reason in &outcome.reasons {
        println!("  {}", reason);
    }

    println!("{}", title("Response"));
    println!("{}", outcome.final_text);
}

fn rejection_line(message: &str, no_color: bool) -> String {
    if no_color {
        format!("REJECTED: {}", message)
    } else {
        format!("{} {}", "REJECTED:".red().bold(), message)
    }
}

/// Print header
fn print_header(no_color: bool) {
    let line = format!("ConsentOS v{} - Interactive", VERSION);
    if no_color {
        println!("========================================");
        println!("  {}", line);
        println!("========================================");
    } else {
        println!("{}", "========================================".bold());
        println!("  {}", line.bold());
        println!("{}", "========================================".bold());
    }
    println!();
}
