/// `products` command: list every product.
use crate::api::CatalogApi;
use crate::catalog::CatalogError;
use crate::cli::OutputCtx;
use crate::cli::output::print;

/// Run `pivnet products`.
///
/// # Errors
///
/// Returns `CatalogError` on API or render failure.
pub fn run(api: &dyn CatalogApi, ctx: &OutputCtx) -> Result<(), CatalogError> {
    let _t = ctx.timer("list_products");
    let products = api.list_products()?;
    drop(_t);

    print(&products, ctx.format)?;
    Ok(())
}
