/// `user-groups` command: list all user groups, or those attached to one release.
use crate::api::CatalogApi;
use crate::catalog::{CatalogError, ReleaseScope, release_scope};
use crate::cli::OutputCtx;
use crate::cli::args::UserGroupsArgs;
use crate::cli::output::print;
use crate::types::UserGroup;

use super::release::find_release;

/// Fetch user groups for the requested scope.
///
/// The slug/version pair is validated before any API call.
///
/// # Errors
///
/// - `CatalogError::Usage` — only one of `--product-slug` / `--release-version` given
/// - `CatalogError::NotFound` — the release version does not exist
/// - `CatalogError::Upstream` — an API call failed
pub fn fetch(
    args: &UserGroupsArgs,
    api: &dyn CatalogApi,
    ctx: &OutputCtx,
) -> Result<Vec<UserGroup>, CatalogError> {
    let scope = release_scope(args.product_slug.as_deref(), args.release_version.as_deref())?;

    match scope {
        ReleaseScope::All => {
            let _t = ctx.timer("list_user_groups");
            Ok(api.list_user_groups()?)
        }
        ReleaseScope::Release {
            product_slug,
            release_version,
        } => {
            let release = find_release(api, product_slug, release_version, ctx)?;

            let _t = ctx.timer("list_user_groups_for_release");
            Ok(api.list_user_groups_for_release(product_slug, release.id)?)
        }
    }
}

/// Run `pivnet user-groups`.
///
/// # Errors
///
/// Returns `CatalogError` on usage error, API failure, unknown version, or render failure.
pub fn run(args: &UserGroupsArgs, api: &dyn CatalogApi, ctx: &OutputCtx) -> Result<(), CatalogError> {
    let groups = fetch(args, api, ctx)?;
    print(&groups, ctx.format)?;
    Ok(())
}
