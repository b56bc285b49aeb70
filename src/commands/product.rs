/// `product` command: show one product by slug.
use crate::api::CatalogApi;
use crate::catalog::CatalogError;
use crate::cli::OutputCtx;
use crate::cli::args::ProductArgs;
use crate::cli::output::print_one;

/// Run `pivnet product`.
///
/// # Errors
///
/// Returns `CatalogError::Upstream` if the product cannot be fetched.
pub fn run(args: &ProductArgs, api: &dyn CatalogApi, ctx: &OutputCtx) -> Result<(), CatalogError> {
    let _t = ctx.timer("get_product");
    let product = api.get_product(&args.product_slug)?;
    drop(_t);

    print_one(&product, ctx.format)?;
    Ok(())
}
