use std::fs;
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;
use zip::write::FileOptions;

const TAG_LISTING: &str =
    r#"[{"ref": "refs/tags/5.9"}, {"ref": "refs/tags/6.0"}, {"ref": "refs/tags/6.1.1"}]"#;

fn binary_command() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("wp-pest"))
}

fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = FileOptions::default();
    for (name, contents) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer
            .write_all(contents.as_bytes())
            .expect("write entry contents");
    }
    writer.finish().expect("finish zip").into_inner()
}

fn stage_drop_in_package(root: &Path) {
    let package = root.join("wp-content/wp-sqlite-db/src/db.php");
    fs::create_dir_all(package.parent().expect("parent")).expect("stage dirs");
    fs::write(&package, "<?php // sqlite drop-in").expect("stage drop-in");
}

fn mock_wordpress_archives(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/tags");
        then.status(200)
            .header("content-type", "application/json")
            .body(TAG_LISTING);
    });
    server.mock(|when, then| {
        when.method(GET).path("/develop/6.1.1.zip");
        then.status(200).body(zip_bytes(&[
            ("wordpress-develop-6.1.1/src/index.php", "develop src stub"),
            (
                "wordpress-develop-6.1.1/tests/phpunit/bootstrap.php",
                "harness",
            ),
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/core/6.1.1.zip");
        then.status(200).body(zip_bytes(&[
            ("WordPress-6.1.1/wp-settings.php", "core settings"),
            ("WordPress-6.1.1/wp-content/index.php", "core content stub"),
        ]));
    });
}

fn endpoint_args(server: &MockServer) -> [String; 6] {
    [
        "--tags-url".to_string(),
        server.url("/tags"),
        "--develop-zip-url".to_string(),
        server.url("/develop/"),
        "--core-zip-url".to_string(),
        server.url("/core/"),
    ]
}

#[test]
fn cli_setup_rejects_an_unknown_project_type() {
    let temp = tempdir().expect("tempdir");
    let mut cmd = binary_command();
    cmd.current_dir(temp.path()).args(["setup", "bla"]);

    cmd.assert().failure().stderr(predicate::str::contains(
        "The argument must either be 'theme' or 'plugin', bla provided.",
    ));
    assert!(!temp.path().join("tests").exists());
}

#[test]
fn cli_setup_requires_a_plugin_slug() {
    let temp = tempdir().expect("tempdir");
    let mut cmd = binary_command();
    cmd.current_dir(temp.path()).args(["setup", "plugin"]);

    cmd.assert().failure().stderr(predicate::str::contains(
        "You need to provide the plugin slug if you want to set up plugin integration test suite.",
    ));
}

#[test]
fn cli_setup_reports_slug_problems_by_cause() {
    let temp = tempdir().expect("tempdir");

    let mut cmd = binary_command();
    cmd.current_dir(temp.path())
        .args(["setup", "plugin", "--plugin-slug", "abc"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "Plugin slug must be at least 5 characters long.",
    ));

    let mut cmd = binary_command();
    cmd.current_dir(temp.path())
        .args(["setup", "plugin", "--plugin-slug", "NO-YELLING"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "Plugin slug must be written in lowercase, separated by a dash.",
    ));
}

#[test]
fn cli_setup_end_to_end_for_a_plugin() {
    let server = MockServer::start();
    mock_wordpress_archives(&server);
    let temp = tempdir().expect("tempdir");
    stage_drop_in_package(temp.path());

    let mut cmd = binary_command();
    cmd.current_dir(temp.path())
        .args(["setup", "plugin", "--plugin-slug", "fake-plugin", "--skip-delete"])
        .args(endpoint_args(&server));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Folder and files created successfully."))
        .stdout(predicate::str::contains("WordPress downloaded successfully."))
        .stdout(predicate::str::contains("Database drop-in copied successfully."))
        .stdout(predicate::str::contains("All done! Go and write tests"));

    let bootstrap =
        fs::read_to_string(temp.path().join("tests/bootstrap.php")).expect("bootstrap");
    assert!(bootstrap.contains("fake-plugin"));
    assert_eq!(
        fs::read_to_string(temp.path().join("wp/src/wp-content/db.php")).expect("drop-in"),
        "<?php // sqlite drop-in"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("wp/src/wp-settings.php")).expect("core overlay"),
        "core settings"
    );
    assert!(temp
        .path()
        .join("wp/tests/phpunit/bootstrap.php")
        .is_file());
    assert!(!temp.path().join("wp/wordpress-develop-6.1.1").exists());
    assert!(!temp.path().join("wordpress-develop-6.1.1.zip").exists());
    // --skip-delete leaves the staging package alone.
    assert!(temp
        .path()
        .join("wp-content/wp-sqlite-db/src/db.php")
        .is_file());
}

#[test]
fn cli_setup_second_invocation_fails_fast_without_network() {
    let server = MockServer::start();
    let tags = server.mock(|when, then| {
        when.method(GET).path("/tags");
        then.status(200).body(TAG_LISTING);
    });
    let temp = tempdir().expect("tempdir");
    fs::create_dir_all(temp.path().join("tests")).expect("existing tests dir");
    fs::create_dir_all(temp.path().join("wp")).expect("existing wp dir");

    let mut cmd = binary_command();
    cmd.current_dir(temp.path())
        .args(["setup", "theme"])
        .args(endpoint_args(&server));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains(
            "tests/ directory already exists. Moving on.",
        ))
        .stdout(predicate::str::contains(
            "WordPress core and test files already downloaded. No need to run this command again.",
        ));
    tags.assert_calls(0);
}

#[test]
fn cli_setup_force_redownloads_an_existing_tree() {
    let server = MockServer::start();
    mock_wordpress_archives(&server);
    let temp = tempdir().expect("tempdir");
    stage_drop_in_package(temp.path());
    fs::create_dir_all(temp.path().join("wp")).expect("existing wp dir");
    fs::write(temp.path().join("wp/stale.txt"), "left over").expect("stale marker");

    let mut cmd = binary_command();
    cmd.current_dir(temp.path())
        .args([
            "setup",
            "plugin",
            "--plugin-slug",
            "fake-plugin",
            "--force",
            "--skip-delete",
        ])
        .args(endpoint_args(&server));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All done! Go and write tests"));
    assert!(!temp.path().join("wp/stale.txt").exists());
    assert!(temp.path().join("wp/src/wp-settings.php").is_file());
}

#[test]
fn cli_setup_rejects_an_unknown_explicit_version() {
    let server = MockServer::start();
    let tags = server.mock(|when, then| {
        when.method(GET).path("/tags");
        then.status(200)
            .header("content-type", "application/json")
            .body(TAG_LISTING);
    });
    let temp = tempdir().expect("tempdir");

    let mut cmd = binary_command();
    cmd.current_dir(temp.path())
        .args(["setup", "theme", "--wp-version", "9.9.9"])
        .args(endpoint_args(&server));

    cmd.assert().failure().stderr(predicate::str::contains(
        "Wrong WordPress version. Make sure the version number is correct.",
    ));
    tags.assert_calls(1);
    assert!(!temp.path().join("wp").exists());
}
