//! Test-suite scaffolding and the database drop-in.
//!
//! Materializes the bundled templates into a project and installs the
//! SQLite drop-in into the downloaded WordPress tree. Template contents
//! are embedded at build time so the binary is self-contained.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use wp_pest_core::{remove_dir_all_if_exists, PluginSlug};

const PHPUNIT_CONFIG: &str = include_str!("../templates/phpunit.xml.tmpl");
const BOOTSTRAP_THEME: &str = include_str!("../templates/bootstrap-theme.php.tmpl");
const BOOTSTRAP_PLUGIN: &str = include_str!("../templates/bootstrap-plugin.php.tmpl");
const PEST_SETUP: &str = include_str!("../templates/Pest.php.tmpl");
const EXAMPLE_UNIT_TEST: &str = include_str!("../templates/ExampleUnitTest.php.tmpl");
const EXAMPLE_INTEGRATION_TEST: &str = include_str!("../templates/ExampleIntegrationTest.php.tmpl");

pub const PLUGIN_SLUG_TOKEN: &str = "%%%PLUGIN-SLUG%%%";

/// Where the drop-in package lands relative to the project root.
pub const DB_DROP_IN_PACKAGE_PATH: &str = "wp-content/wp-sqlite-db/src/db.php";
/// The staging directory the cleanup step offers to delete.
pub const DROP_IN_STAGING_DIR: &str = "wp-content";

/// Kind of project the test suite is being set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Theme,
    Plugin,
}

impl ProjectType {
    /// Parses the positional argument; anything but "theme" or "plugin"
    /// is rejected (the caller owns the user-facing message).
    pub fn from_arg(value: &str) -> Option<Self> {
        match value {
            "theme" => Some(ProjectType::Theme),
            "plugin" => Some(ProjectType::Plugin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Theme => "theme",
            ProjectType::Plugin => "plugin",
        }
    }
}

/// Filesystem failures while scaffolding or installing the drop-in.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Error happened when creating files and folders at {}.", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed copying the database drop-in from {}.", .path.display())]
    DropIn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of the scaffold step; an existing `tests/` directory is left
/// untouched and reported rather than treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Created,
    AlreadyPresent,
}

/// Writes the test-suite skeleton: `phpunit.xml` at the project root plus
/// `tests/` with the bootstrap (slug token substituted for plugins), the
/// Pest setup file, and both example tests. Re-entrant: if `tests/`
/// already exists nothing is written.
pub fn install_test_suite(
    root: &Path,
    project_type: ProjectType,
    plugin_slug: Option<&PluginSlug>,
) -> Result<ScaffoldOutcome, ScaffoldError> {
    let tests_dir = root.join("tests");
    if tests_dir.exists() {
        return Ok(ScaffoldOutcome::AlreadyPresent);
    }

    write_file(&root.join("phpunit.xml"), PHPUNIT_CONFIG)?;
    let bootstrap = match project_type {
        ProjectType::Theme => BOOTSTRAP_THEME.to_string(),
        ProjectType::Plugin => {
            let slug = plugin_slug.map(PluginSlug::as_str).unwrap_or_default();
            BOOTSTRAP_PLUGIN.replace(PLUGIN_SLUG_TOKEN, slug)
        }
    };
    write_file(&tests_dir.join("bootstrap.php"), &bootstrap)?;
    write_file(&tests_dir.join("Pest.php"), PEST_SETUP)?;
    write_file(&tests_dir.join("Unit/ExampleTest.php"), EXAMPLE_UNIT_TEST)?;
    write_file(
        &tests_dir.join("Integration/ExampleTest.php"),
        EXAMPLE_INTEGRATION_TEST,
    )?;
    tracing::debug!(project_type = project_type.as_str(), "scaffolded test suite");
    Ok(ScaffoldOutcome::Created)
}

/// Copies the SQLite drop-in staged at the project root into the
/// downloaded tree so the test environment runs without a MySQL server.
/// The destination parent is created first; the downloaded tree is left
/// in place on failure.
pub fn install_db_drop_in(root: &Path, wp_dir: &Path) -> Result<(), ScaffoldError> {
    let package_drop_in = root.join(DB_DROP_IN_PACKAGE_PATH);
    let core_drop_in_dir = wp_dir.join("src").join("wp-content");
    fs::create_dir_all(&core_drop_in_dir).map_err(|source| ScaffoldError::Io {
        path: core_drop_in_dir.clone(),
        source,
    })?;
    fs::copy(&package_drop_in, core_drop_in_dir.join("db.php")).map_err(|source| {
        ScaffoldError::DropIn {
            path: package_drop_in.clone(),
            source,
        }
    })?;
    Ok(())
}

/// Deletes the drop-in staging directory left at the project root.
pub fn remove_drop_in_staging(root: &Path) -> Result<(), ScaffoldError> {
    let staging = root.join(DROP_IN_STAGING_DIR);
    remove_dir_all_if_exists(&staging).map_err(|source| ScaffoldError::Io {
        path: staging.clone(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ScaffoldError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })
}
