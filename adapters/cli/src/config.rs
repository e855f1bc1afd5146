use std::{
    fs,
    path::{Path, PathBuf},
};

use accurate_clocks_core::CurveAlgorithm;
use anyhow::{Context, Result};
use serde::Deserialize;

/// File read from the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "accurate-clocks.toml";

const DEFAULT_DESCRIPTION: &str = "§7Accurate §6Clocks§r\n§8JE 1.21.6+§r by GrakePCH";

/// Build settings read from `accurate-clocks.toml`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct BuildConfig {
    /// Directory holding one sub-directory per template.
    pub(crate) input_dir: PathBuf,
    /// Directory generated packs are written to.
    pub(crate) output_dir: PathBuf,
    /// Directory name of the composite pack.
    pub(crate) composite_name: String,
    /// Image copied into the composite pack as `pack.png`.
    pub(crate) icon_path: PathBuf,
    /// Description of the composite pack.
    pub(crate) composite_description: String,
    /// Seed for the fallback shuffle; entropy is used when absent.
    pub(crate) shuffle_seed: Option<u64>,
    /// Curve algorithm the thresholds are derived from.
    pub(crate) curve: CurveAlgorithm,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("inputs_templates"),
            output_dir: PathBuf::from("outputs"),
            composite_name: "AccurateClocks".to_owned(),
            icon_path: PathBuf::from("icon.png"),
            composite_description: DEFAULT_DESCRIPTION.to_owned(),
            shuffle_seed: None,
            curve: CurveAlgorithm::default(),
        }
    }
}

impl BuildConfig {
    /// Parses configuration from TOML text.
    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse build configuration")
    }

    /// Loads the configuration file.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read
    /// if present and defaults are used otherwise.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}
