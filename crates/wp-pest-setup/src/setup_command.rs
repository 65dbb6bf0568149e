use std::path::{Path, PathBuf};

use thiserror::Error;
use wp_pest_archive::{extract_and_flatten, fetch_to_file, ExtractError, FetchError};
use wp_pest_core::{remove_dir_all_if_exists, PluginSlug, SlugError};
use wp_pest_scaffold::{
    install_db_drop_in, install_test_suite, remove_drop_in_staging, ProjectType, ScaffoldError,
    ScaffoldOutcome,
};
use wp_pest_version::{core_release_tag, VersionError, VersionRequest, VersionResolver};

use crate::cli_args::SetupArgs;
use crate::status;

/// Name of the platform directory created under the project root.
pub const WP_DIR: &str = "wp";

/// Failures surfaced by the setup command; each renders as a single
/// user-facing line in `main`. `AlreadyDownloaded` is the idempotency
/// guard: informational styling, but still a non-zero exit.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("The argument must either be 'theme' or 'plugin', {0} provided.")]
    InvalidProjectType(String),
    #[error(
        "You need to provide the plugin slug if you want to set up plugin integration test suite."
    )]
    MissingPluginSlug,
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(
        "WordPress core and test files already downloaded. No need to run this command again."
    )]
    AlreadyDownloaded,
    #[error("Failed removing the existing WordPress directory at {}.", .path.display())]
    ForceRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Runs the whole setup sequence against `root`. `confirm` is the
/// injected cleanup decision: the interactive build passes a prompt
/// backed by the terminal, tests pass a fixed answer.
///
/// The platform-directory guard runs before version resolution so a
/// repeated invocation without `--force` performs no network calls.
pub fn execute_setup(
    args: &SetupArgs,
    root: &Path,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<(), SetupError> {
    let project_type = ProjectType::from_arg(&args.project_type)
        .ok_or_else(|| SetupError::InvalidProjectType(args.project_type.clone()))?;

    let plugin_slug = match project_type {
        ProjectType::Plugin => {
            let raw = args
                .plugin_slug
                .as_deref()
                .filter(|slug| !slug.is_empty())
                .ok_or(SetupError::MissingPluginSlug)?;
            Some(PluginSlug::parse(raw)?)
        }
        ProjectType::Theme => None,
    };

    status::text("Attempting to create tests folder");
    match install_test_suite(root, project_type, plugin_slug.as_ref())? {
        ScaffoldOutcome::Created => status::success("Folder and files created successfully."),
        ScaffoldOutcome::AlreadyPresent => {
            status::info("tests/ directory already exists. Moving on.")
        }
    }

    let wp_dir = root.join(WP_DIR);
    if wp_dir.exists() {
        if !args.force {
            return Err(SetupError::AlreadyDownloaded);
        }
        remove_dir_all_if_exists(&wp_dir).map_err(|source| SetupError::ForceRemove {
            path: wp_dir.clone(),
            source,
        })?;
        status::info("Removed the previously downloaded WordPress directory.");
    }

    let request = VersionRequest::from_arg(&args.wp_version);
    match &request {
        VersionRequest::Latest => status::text(
            "Downloading the latest WordPress version. This may take a while, grab a coffee or tea 🍵...",
        ),
        VersionRequest::Explicit(version) => status::text(&format!(
            "Downloading WordPress version {version}. This may take a while, grab a coffee or tea 🍵..."
        )),
    }

    let mut resolver = VersionResolver::new(args.tags_url.clone());
    let version = resolver.resolve(&request)?;
    tracing::info!(version = %version, "resolved WordPress version");

    // The develop archive carries the test harness but not a complete
    // distributable src tree; the core archive overlays src afterward.
    let develop_zip = root.join(format!("wordpress-develop-{version}.zip"));
    fetch_to_file(
        &format!("{}{version}.zip", args.develop_zip_url),
        &develop_zip,
    )?;
    extract_and_flatten(
        &develop_zip,
        &wp_dir,
        &format!("wordpress-develop-{version}"),
        &wp_dir,
    )?;

    let core_tag = core_release_tag(&version);
    let core_zip = root.join(format!("WordPress-{core_tag}.zip"));
    fetch_to_file(&format!("{}{core_tag}.zip", args.core_zip_url), &core_zip)?;
    extract_and_flatten(
        &core_zip,
        &wp_dir,
        &format!("WordPress-{core_tag}"),
        &wp_dir.join("src"),
    )?;

    status::success("WordPress downloaded successfully.");

    install_db_drop_in(root, &wp_dir)?;
    status::success("Database drop-in copied successfully.");

    if !args.skip_delete && confirm("Do you want to clean the DB package folder?") {
        remove_drop_in_staging(root)?;
        status::success("Database drop-in folder deleted successfully.");
    }

    status::success("All done! Go and write tests 😄");
    Ok(())
}
