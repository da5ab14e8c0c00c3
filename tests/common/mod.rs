//! Shared testing utilities for worker-provision CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated host layout: a document root, a sites directory, a data bag and a
/// config whose commands are harmless stand-ins.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with an already "installed" package
    /// and commands that succeed.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("www")).expect("Failed to create docroot");
        fs::create_dir_all(root.path().join("sites-available"))
            .expect("Failed to create sites directory");

        let ctx = Self { root };
        ctx.write_data_bag(&current_username());
        ctx.write_config(&["printf", "installed"], &["true"], &["true"], &["true"]);
        ctx
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn docroot(&self) -> PathBuf {
        self.root().join("www")
    }

    pub fn run_dir(&self) -> PathBuf {
        self.docroot().join("oa-runone")
    }

    pub fn site_file(&self) -> PathBuf {
        self.root().join("sites-available").join("worker.conf")
    }

    pub fn data_bag_path(&self) -> PathBuf {
        self.root().join("local.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("provision.toml")
    }

    /// Write the data bag item with the given owner.
    pub fn write_data_bag(&self, username: &str) {
        let item = serde_json::json!({
            "id": "local",
            "web_docroot": self.docroot(),
            "username": username,
        });
        fs::write(self.data_bag_path(), item.to_string()).expect("Failed to write data bag");
    }

    /// Write the provisioning config with the given command lines.
    pub fn write_config(&self, query: &[&str], install: &[&str], enable: &[&str], reload: &[&str]) {
        let content = format!(
            r#"[package]
query = {}
install = {}

[site]
available_dir = "{}"
enable_command = {}
disable_command = ["true"]

[service]
reload_command = {}
"#,
            toml_array(query),
            toml_array(install),
            self.root().join("sites-available").display(),
            toml_array(enable),
            toml_array(reload),
        );
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Build a command for invoking the compiled binary with this context's inputs.
    pub fn cli(&self, subcommand: &str) -> Command {
        let mut cmd =
            Command::cargo_bin("worker-provision").expect("Failed to locate worker-provision binary");
        cmd.current_dir(self.root())
            .env_remove("RUST_LOG")
            .arg(subcommand)
            .arg("--config")
            .arg(self.config_path())
            .arg("--data-bag")
            .arg(self.data_bag_path())
            .args(["--hostname", "worker-1"]);
        cmd
    }
}

fn toml_array(argv: &[&str]) -> String {
    let items: Vec<String> = argv.iter().map(|arg| format!("\"{}\"", arg)).collect();
    format!("[{}]", items.join(", "))
}

/// Name of the account running the tests.
pub fn current_username() -> String {
    let output = std::process::Command::new("id").arg("-un").output().expect("Failed to run id");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
