//! Sandboxed configuration hierarchies.
//!
//! `TestEnv` owns a temporary workspace (the top of the directory walk) and a
//! temporary global configuration directory, and can either resolve in-process
//! or run the `confstack` binary against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use confstack::{ConfigResolver, EnvSnapshot};

/// Result of running the confstack binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    /// Top of the directory walk
    pub workspace: TempDir,
    /// Global configuration directory (`$CARGO_HOME`)
    pub home: TempDir,
    /// Canonical workspace path, matching what the binary sees as its cwd
    root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let workspace = tempfile::tempdir().expect("Failed to create workspace");
        let root = workspace
            .path()
            .canonicalize()
            .expect("Failed to canonicalize workspace");
        Self {
            workspace,
            home: tempfile::tempdir().expect("Failed to create home"),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Path of `<dir>/.cargo/config.toml` below the workspace.
    pub fn config_path(&self, dir: &str) -> PathBuf {
        self.path(dir).join(".cargo").join("config.toml")
    }

    /// Write a file below the workspace, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        write_file(&self.path(relative), content);
        self
    }

    /// Write `<dir>/.cargo/config.toml` below the workspace.
    pub fn config(&self, dir: &str, content: &str) -> &Self {
        let relative = if dir.is_empty() {
            ".cargo/config.toml".to_string()
        } else {
            format!("{}/.cargo/config.toml", dir)
        };
        self.write(&relative, content)
    }

    /// Write the global `config.toml`.
    pub fn global_config(&self, content: &str) -> &Self {
        write_file(&self.home.path().join("config.toml"), content);
        self
    }

    /// Create a directory below the workspace.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        std::fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    /// Resolver rooted at `dir`, bounded by the workspace, with no inherited
    /// environment.
    pub fn resolver(&self, dir: &str) -> ConfigResolver {
        self.resolver_with_env(dir, EnvSnapshot::empty())
    }

    pub fn resolver_with_env(&self, dir: &str, env: EnvSnapshot) -> ConfigResolver {
        let cwd = self.mkdir(dir);
        ConfigResolver::new(cwd)
            .with_env(env)
            .with_global_dir(Some(self.home.path().to_path_buf()))
            .with_search_stop(&self.root)
    }

    /// Run the binary from `dir` (relative to the workspace).
    pub fn run(&self, dir: &str, args: &[&str]) -> TestResult {
        self.run_with_env(dir, args, &[])
    }

    pub fn run_with_env(&self, dir: &str, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let cwd = self.mkdir(dir);
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_confstack"));
        cmd.current_dir(&cwd)
            .args(args)
            .env_clear()
            .env("CARGO_HOME", self.home.path())
            .env("CONFSTACK_TEST_HOME", self.home.path())
            .env("CONFSTACK_TEST_ROOT", &self.root)
            .env("NO_COLOR", "1");
        if let Some(path) = std::env::var_os("PATH") {
            cmd.env("PATH", path);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute confstack");
        output_to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
