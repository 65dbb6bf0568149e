use clap::{Args, Parser, Subcommand};

pub const WP_DEVELOP_ZIP_URL: &str =
    "https://github.com/WordPress/wordpress-develop/archive/refs/tags/";
pub const WP_CORE_ZIP_URL: &str = "https://github.com/WordPress/WordPress/archive/refs/tags/";

#[derive(Debug, Parser)]
#[command(
    name = "wp-pest",
    about = "Sets up WordPress integration and unit test suites.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set up the test suites for a theme or a plugin.
    Setup(SetupArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SetupArgs {
    #[arg(
        value_name = "PROJECT_TYPE",
        help = "Select whether you want to setup tests for theme or a plugin. Can be \"theme\" or \"plugin\"."
    )]
    pub project_type: String,

    #[arg(
        long = "wp-version",
        env = "WP_PEST_WP_VERSION",
        default_value = "latest",
        help = "Pass the version of the WordPress you want to test on."
    )]
    pub wp_version: String,

    #[arg(
        long = "plugin-slug",
        help = "If you are setting the plugin tests provide the plugin slug."
    )]
    pub plugin_slug: Option<String>,

    #[arg(
        long,
        help = "Delete and re-download the wp folder even if it already exists."
    )]
    pub force: bool,

    #[arg(
        long = "skip-delete",
        help = "Skip the cleanup prompt and leave the drop-in staging folder in place."
    )]
    pub skip_delete: bool,

    #[arg(
        long = "tags-url",
        env = "WP_PEST_TAGS_URL",
        default_value = wp_pest_version::WP_TAGS_URL,
        help = "Override the WordPress version listing endpoint."
    )]
    pub tags_url: String,

    #[arg(
        long = "develop-zip-url",
        env = "WP_PEST_DEVELOP_ZIP_URL",
        default_value = WP_DEVELOP_ZIP_URL,
        help = "Override the wordpress-develop archive base URL."
    )]
    pub develop_zip_url: String,

    #[arg(
        long = "core-zip-url",
        env = "WP_PEST_CORE_ZIP_URL",
        default_value = WP_CORE_ZIP_URL,
        help = "Override the WordPress core archive base URL."
    )]
    pub core_zip_url: String,
}
