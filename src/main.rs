#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! pivnet — query products, releases, user groups and dependencies from the catalog API.

mod api;
mod catalog;
mod cli;
mod commands;
mod config;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use api::HttpCatalogClient;
use catalog::CatalogError;
use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

/// Exit code for configuration errors.
const EXIT_CONFIG: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose || cli.debug);

    let settings = match config::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let ctx = OutputCtx::new(settings.format, cli.debug);

    let result = HttpCatalogClient::new(&settings.client)
        .map_err(CatalogError::from)
        .and_then(|client| commands::dispatch(&cli.command, &client, &ctx));

    if let Err(err) = result {
        tracing::debug!(error = ?err, "command failed");
        let error_output = ErrorOutput::from_catalog_error(&err);
        write_error(&error_output, ctx.format);
        std::process::exit(err.exit_code());
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug` when verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose { "pivnet=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
