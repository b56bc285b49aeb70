/// `releases` command: list the releases of a product.
use crate::api::CatalogApi;
use crate::catalog::CatalogError;
use crate::cli::OutputCtx;
use crate::cli::args::ProductArgs;
use crate::cli::output::print;

/// Run `pivnet releases`.
///
/// # Errors
///
/// Returns `CatalogError` on API or render failure.
pub fn run(args: &ProductArgs, api: &dyn CatalogApi, ctx: &OutputCtx) -> Result<(), CatalogError> {
    let _t = ctx.timer("list_releases");
    let releases = api.list_releases(&args.product_slug)?;
    drop(_t);

    print(&releases, ctx.format)?;
    Ok(())
}
