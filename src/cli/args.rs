/// CLI argument definitions via clap derive.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use super::output::RenderError;

/// pivnet — query products, releases and user groups from the catalog API.
#[derive(Debug, Parser)]
#[command(
    name = "pivnet",
    about = "Query products, releases, user groups and dependencies from the Pivotal Network API",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output format [default: table].
    #[arg(long, global = true, value_name = "FORMAT", env = "PIVNET_FORMAT")]
    pub format: Option<OutputFormat>,

    /// API host, scheme included.
    #[arg(long, global = true, value_name = "URL", env = "PIVNET_HOST")]
    pub host: Option<String>,

    /// API token sent with every request.
    #[arg(
        long,
        global = true,
        value_name = "TOKEN",
        env = "PIVNET_API_TOKEN",
        hide_env_values = true
    )]
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file path (default: <config dir>/pivnet/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log requests and resolution steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also log per-step timings (implies --verbose).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Bordered table with a header row (human-readable).
    #[default]
    Table,
    /// Compact single-line JSON.
    Json,
    /// YAML document with a leading `---` marker.
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

/// Parses format names from the config file; clap uses its own `ValueEnum` path.
impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(RenderError::UnknownFormat(other.to_owned())),
        }
    }
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all products.
    Products,
    /// Show one product.
    Product(ProductArgs),
    /// List the releases of a product.
    Releases(ProductArgs),
    /// Show one release of a product.
    Release(ReleaseArgs),
    /// List the releases a release depends on.
    ReleaseDependencies(ReleaseArgs),
    /// List user groups, optionally only those attached to one release.
    UserGroups(UserGroupsArgs),
}

/// Arguments for commands addressing a product.
#[derive(Debug, Parser)]
pub struct ProductArgs {
    /// Product slug e.g. p-mysql
    #[arg(long, value_name = "SLUG")]
    pub product_slug: String,
}

/// Arguments for commands addressing one release of a product.
#[derive(Debug, Parser)]
pub struct ReleaseArgs {
    /// Product slug e.g. p-mysql
    #[arg(long, value_name = "SLUG")]
    pub product_slug: String,

    /// Release version e.g. 0.1.2-rc1
    #[arg(long, value_name = "VERSION")]
    pub release_version: String,
}

/// Arguments for `pivnet user-groups`. Both or neither must be given.
#[derive(Debug, Parser)]
pub struct UserGroupsArgs {
    /// Product slug e.g. p-mysql
    #[arg(long, value_name = "SLUG")]
    pub product_slug: Option<String>,

    /// Release version e.g. 0.1.2-rc1
    #[arg(long, value_name = "VERSION")]
    pub release_version: Option<String>,
}
