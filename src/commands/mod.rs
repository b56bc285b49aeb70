/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod product;
pub mod products;
pub mod release;
pub mod release_dependencies;
pub mod releases;
pub mod user_groups;

use crate::api::CatalogApi;
use crate::catalog::CatalogError;
use crate::cli::OutputCtx;
use crate::cli::args::Command;

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `CatalogError` on any command failure.
pub fn dispatch(command: &Command, api: &dyn CatalogApi, ctx: &OutputCtx) -> Result<(), CatalogError> {
    match command {
        Command::Products => products::run(api, ctx),
        Command::Product(args) => product::run(args, api, ctx),
        Command::Releases(args) => releases::run(args, api, ctx),
        Command::Release(args) => release::run(args, api, ctx),
        Command::ReleaseDependencies(args) => release_dependencies::run(args, api, ctx),
        Command::UserGroups(args) => user_groups::run(args, api, ctx),
    }
}
