// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// An isolated home for one test: empty config file and data dir.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        Sandbox { dir }
    }

    /// Replace the config file content.
    pub fn config(&self, content: &str) -> &Self {
        std::fs::write(self.dir.path().join("config.toml"), content).unwrap();
        self
    }

    /// `wisssh` reading only this sandbox's config and data.
    pub fn wisssh(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("wisssh");
        cmd.env("WISSSH_CONFIG", self.dir.path().join("config.toml"))
            .env("WISSSH_DATA_DIR", self.dir.path().join("data"))
            .env_remove("WISSSH_API_ORIGIN")
            .env_remove("WISSSH_PASSWORD")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn session_file(&self) -> std::path::PathBuf {
        self.dir.path().join("data").join("session.json")
    }
}
