// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendline", "spendline"));

pub const FILE_ENV: &str = "SPENDLINE_FILE";
pub const DEFAULT_FILE_NAME: &str = "expenses.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: PathBuf,
}

impl Settings {
    /// `--file` wins over `SPENDLINE_FILE`, which wins over the platform data dir.
    pub fn resolve(cli_file: Option<&str>) -> Result<Self> {
        let env_file = std::env::var(FILE_ENV).ok();
        Self::resolve_with(cli_file, env_file.as_deref())
    }

    pub fn resolve_with(cli_file: Option<&str>, env_file: Option<&str>) -> Result<Self> {
        let explicit = cli_file
            .or(env_file)
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let data_file = match explicit {
            Some(p) => PathBuf::from(p),
            None => default_data_path()?,
        };
        Ok(Self { data_file })
    }
}

pub fn default_data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join(DEFAULT_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_beats_env() {
        let s = Settings::resolve_with(Some("/tmp/a.csv"), Some("/tmp/b.csv")).unwrap();
        assert_eq!(s.data_file, PathBuf::from("/tmp/a.csv"));
        let s = Settings::resolve_with(None, Some(" /tmp/b.csv ")).unwrap();
        assert_eq!(s.data_file, PathBuf::from("/tmp/b.csv"));
    }
}
