/// `release-dependencies` command: list the releases a release depends on.
use crate::api::CatalogApi;
use crate::catalog::CatalogError;
use crate::cli::OutputCtx;
use crate::cli::args::ReleaseArgs;
use crate::cli::output::print;
use crate::types::ReleaseDependency;

use super::release::find_release;

/// Resolve product and release, then fetch the release's dependencies.
///
/// # Errors
///
/// Returns `CatalogError` on API failure or unknown version.
pub fn fetch(
    args: &ReleaseArgs,
    api: &dyn CatalogApi,
    ctx: &OutputCtx,
) -> Result<Vec<ReleaseDependency>, CatalogError> {
    let _t_product = ctx.timer("get_product");
    let product = api.get_product(&args.product_slug)?;
    drop(_t_product);

    let release = find_release(api, &args.product_slug, &args.release_version, ctx)?;

    let _t_deps = ctx.timer("get_release_dependencies");
    let dependencies = api.get_release_dependencies(product.id, release.id)?;
    drop(_t_deps);

    Ok(dependencies)
}

/// Run `pivnet release-dependencies`.
///
/// # Errors
///
/// Returns `CatalogError` on API failure, unknown version, or render failure.
pub fn run(args: &ReleaseArgs, api: &dyn CatalogApi, ctx: &OutputCtx) -> Result<(), CatalogError> {
    let dependencies = fetch(args, api, ctx)?;
    print(&dependencies, ctx.format)?;
    Ok(())
}
