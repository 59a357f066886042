//! stocktop - live sortable quote table for the terminal.
//!
//! Polls a batch quote API for a fixed set of symbols and renders them as a
//! table. Digit keys `1..=9` sort by the matching column (press again to
//! flip direction), `q` quits.
//!
//! Usage:
//!   stocktop AAPL MSFT GOOG    # symbols from the command line
//!   stocktop                   # symbols from ~/.stocktop.toml
//!   stocktop --fake AAPL MSFT  # offline demo feed, no token needed
//!   stocktop -i 10 AAPL        # poll every 10 seconds

use tikv_jemallocator::Jemalloc;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stocktop_core::config::{Config, ConfigError, TOKEN_ENV};
use stocktop_core::feed::{self, FakeFeed, IexFeed, QuoteFeed};
use stocktop_core::pipeline;
use stocktop_core::tui::{App, spawn_input_thread};

/// Live sortable quote table.
#[derive(Parser)]
#[command(name = "stocktop", about = "Live sortable quote table", version)]
struct Args {
    /// Symbols to track. Ignored when ~/.stocktop.toml lists symbols.
    #[arg(value_name = "SYMBOL")]
    symbols: Vec<String>,

    /// Poll interval in seconds (default: 5, or the config file value).
    #[arg(short = 'i', long, value_name = "SECONDS")]
    interval: Option<u64>,

    /// Quote API token (default: config file, then STOCKTOP_TOKEN).
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Use the offline fake feed instead of the network.
    #[arg(long)]
    fake: bool,
}

/// Logs go to stderr, hidden behind the alternate screen; redirect with
/// `RUST_LOG=debug stocktop ... 2>stocktop.log` to capture them.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let args = Args::parse();

    let config = match Config::resolve(&args.symbols, args.token.clone(), args.interval) {
        Ok(config) => config,
        Err(ConfigError::NoSymbols) => {
            eprintln!(
                "Error: no symbols given (pass them as arguments or list them in ~/.stocktop.toml)"
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let quote_feed: Box<dyn QuoteFeed> = if args.fake {
        Box::new(FakeFeed::new(&config.symbols, &config.fields))
    } else {
        let Some(token) = config.token.clone() else {
            eprintln!(
                "Error: no API token (use --token, the config file, or {TOKEN_ENV}); \
                 --fake runs without one"
            );
            std::process::exit(1);
        };
        match IexFeed::new(config.symbols.clone(), config.fields.clone(), token) {
            Ok(feed) => Box::new(feed),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    };

    info!(
        symbols = config.symbols.len(),
        interval = config.interval.as_secs(),
        fake = args.fake,
        "starting poller"
    );

    let (tx, rx) = pipeline::channel();
    feed::spawn_poller(quote_feed, config.interval, tx.clone());
    spawn_input_thread(tx);

    if let Err(e) = App::new().run(rx) {
        eprintln!("Error running TUI: {e}");
        std::process::exit(1);
    }
}
