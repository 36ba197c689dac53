#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the top_langs binary.
#[macro_export]
macro_rules! top_langs {
    () => {{
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("top_langs"));
        cmd.env_remove("GITHUB_TOKEN").env_remove("RUST_LOG");
        cmd
    }};
}

pub const SAMPLE_SNAPSHOT: &str = r#"{"Go": 700, "Rust": 200, "HTML": 80, "CSS": 20}"#;

/// A scratch directory holding settings and snapshot files.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Settings that chart the snapshot at `langs.json` without the network.
    pub fn create_offline_settings(&self, extra: &str) {
        let settings = format!(
            "username = \"octocat\"\nuse_data = \"old\"\njson_save_path = \"langs.json\"\nimage_save_path = \"out/chart.svg\"\n{extra}"
        );
        self.create_file("settings.toml", &settings);
    }
}
