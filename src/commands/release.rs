/// `release` command: show one release of a product, addressed by version.
use tracing::debug;

use crate::api::CatalogApi;
use crate::catalog::{CatalogError, resolve};
use crate::cli::OutputCtx;
use crate::cli::args::ReleaseArgs;
use crate::cli::output::print_one;
use crate::types::Release;

/// List a product's releases and pick the one whose version equals `version`.
///
/// Shared by every command that takes `--product-slug` and `--release-version`.
///
/// # Errors
///
/// - `CatalogError::Upstream` — the release listing failed
/// - `CatalogError::NotFound` — no release has exactly this version
pub fn find_release(
    api: &dyn CatalogApi,
    product_slug: &str,
    version: &str,
    ctx: &OutputCtx,
) -> Result<Release, CatalogError> {
    let _t_list = ctx.timer("list_releases");
    let releases = api.list_releases(product_slug)?;
    drop(_t_list);

    let release = resolve(&releases, version)?;
    debug!(product_slug, version, release_id = release.id, "resolved release");
    Ok(release.clone())
}

/// Run `pivnet release`.
///
/// # Errors
///
/// Returns `CatalogError` on API failure, unknown version, or render failure.
pub fn run(args: &ReleaseArgs, api: &dyn CatalogApi, ctx: &OutputCtx) -> Result<(), CatalogError> {
    let release = find_release(api, &args.product_slug, &args.release_version, ctx)?;
    print_one(&release, ctx.format)?;
    Ok(())
}
