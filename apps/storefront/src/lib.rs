//! # Storefront Library
//!
//! Widgets, the event coordinator and the headless driver around the
//! storefront core and cart store.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (logging & command loop)
//! ├── config.rs       ◄─── storefront.toml + env overrides
//! ├── catalog.rs      ◄─── Products, categories, slides
//! ├── widgets/
//! │   ├── carousel.rs, ribbon.rs, step_slider.rs, checkbox.rs
//! │   ├── product_grid.rs, cart_icon.rs, checkout_view.rs
//! │   └── viewport.rs ◄─── Viewport-wide pointer events
//! ├── coordinator.rs  ◄─── Widget channel → component routing
//! ├── storefront.rs   ◄─── Composition root
//! ├── commands.rs     ◄─── Line command parser / executor
//! └── error.rs        ◄─── AppError, ErrorCode, ErrorReport
//! ```
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin line ──► Command ──► widget input (click, key, drag, select)     │
//! │                                   │                                     │
//! │                                   ▼ emit on the widget's own channel    │
//! │                          EventCoordinator                               │
//! │                     ┌─────────────┴──────────────┐                      │
//! │                     ▼                            ▼                      │
//! │              ProductsGrid                   CartStore                   │
//! │           (filter, new cards)      (line items, checkout phase)         │
//! │                                                  │ cart-update          │
//! │                                        ┌─────────┴─────────┐            │
//! │                                        ▼                   ▼            │
//! │                                    CartIcon          CheckoutView       │
//! │                                                                         │
//! │  WHY: widgets never see each other; every cross-widget effect goes      │
//! │       through the coordinator, synchronously, before emit() returns.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod storefront;
pub mod widgets;

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use catalog::Catalog;
pub use commands::{Command, Outcome};
pub use config::StorefrontConfig;
pub use coordinator::EventCoordinator;
pub use error::{AppError, AppResult, ErrorCode, ErrorReport};
pub use storefront::{Storefront, StorefrontView};

/// Runs the headless storefront on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,storefront=debug, overridden with RUST_LOG          │
/// │                                                                         │
/// │  2. Load Configuration                                                  │
/// │     • --config <path>: must load, errors are fatal                      │
/// │     • otherwise: platform config dir, defaults on any problem           │
/// │                                                                         │
/// │  3. Build Storefront (catalog, widgets, coordinator)                    │
/// │                                                                         │
/// │  4. Command Loop                                                        │
/// │     • one command per line, state printed after each                    │
/// │     • command errors print "error[CODE]: ..." and the loop continues    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting storefront");

    let config = match config_path_from_args(std::env::args().skip(1))? {
        Some(path) => StorefrontConfig::load(Some(path))?,
        None => StorefrontConfig::load_or_default(None),
    };

    let storefront = Storefront::from_config(&config)?;
    println!("{}", commands::render(&storefront));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed, stopping");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match line.parse::<Command>() {
            Ok(command) => commands::execute(&storefront, command).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(Outcome::Continue(text)) => println!("{text}"),
            Ok(Outcome::Quit) => break,
            Err(err) => println!("{}", ErrorReport::from(&err)),
        }
    }

    info!(cart_items = storefront.store().total_count(), "Storefront stopped");
    Ok(())
}

/// Reads `--config <path>` from the command line.
fn config_path_from_args(mut args: impl Iterator<Item = String>) -> AppResult<Option<PathBuf>> {
    match args.next().as_deref() {
        None => Ok(None),
        Some("--config") => args
            .next()
            .map(|path| Some(PathBuf::from(path)))
            .ok_or_else(|| AppError::ConfigLoad("--config needs a path".into())),
        Some(other) => Err(AppError::ConfigLoad(format!("unexpected argument: {other}"))),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_checkout=trace` - Trace the cart store only
/// - Default: `info,storefront=debug`
///
/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    // try_init: a second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
