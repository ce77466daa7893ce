//! # Storefront Entry Point
//!
//! Headless storefront driven by line commands on stdin.
//!
//! ```text
//! $ printf 'add tom-yam\ncart open\nshow\n' | storefront
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use storefront_lib::ErrorReport;

#[tokio::main]
async fn main() -> ExitCode {
    match storefront_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", ErrorReport::from(&err));
            ExitCode::FAILURE
        }
    }
}
