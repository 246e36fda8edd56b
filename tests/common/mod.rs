#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const DATASET_FILE: &str = "employee_salary_dataset.csv";

/// Path of a file checked in under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "data", name]
        .iter()
        .collect()
}

/// Temporary working directory for one CLI run; removed on drop.
pub struct TestWorkspace {
    root: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create scratch dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes `contents` to `name` inside the workspace.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).unwrap_or_else(|err| panic!("write {path:?}: {err}"));
        path
    }

    /// Places the salary fixture where the CLI looks for it by default.
    pub fn with_default_dataset(self) -> Self {
        fs::copy(fixture_path(DATASET_FILE), self.path().join(DATASET_FILE))
            .expect("copy salary fixture");
        self
    }
}
