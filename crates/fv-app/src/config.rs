//! Tool configuration loaded from YAML.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fv_core::{Real, ensure_positive};
use fv_graph::{AmbiguityPolicy, BuildOptions};
use fv_schedule::{PipeCatalog, PipeSchedule, SeriesMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};

fn default_tolerance() -> Real {
    0.005
}

fn default_budget_factor() -> usize {
    2
}

/// Settings shared by every command.
///
/// ```yaml
/// catalog_dir: data/pipe_types
/// tolerance: 0.005
/// traversal_budget_factor: 2
/// hard_fail_series: false
/// ambiguity: resolve
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FvConfig {
    /// Directory of pipe type tables. Relative paths are taken from the
    /// config file's directory.
    pub catalog_dir: PathBuf,
    /// Endpoint adjacency tolerance in drawing units.
    #[serde(default = "default_tolerance")]
    pub tolerance: Real,
    /// Traversal budget as a multiple of the tree size.
    #[serde(default = "default_budget_factor")]
    pub traversal_budget_factor: usize,
    #[serde(default)]
    pub hard_fail_series: bool,
    #[serde(default)]
    pub ambiguity: AmbiguityPolicy,
}

impl FvConfig {
    pub fn new(catalog_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_dir: catalog_dir.into(),
            tolerance: default_tolerance(),
            traversal_budget_factor: default_budget_factor(),
            hard_fail_series: false,
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    /// Load and validate a YAML config file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: FvConfig = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        if config.catalog_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.catalog_dir = base.join(&config.catalog_dir);
            }
        }
        config.validate()?;
        debug!(path = %path.display(), catalog = %config.catalog_dir.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        ensure_positive(self.tolerance, "tolerance")
            .map_err(|e| AppError::Config(e.to_string()))?;
        if self.traversal_budget_factor == 0 {
            return Err(AppError::Config(
                "traversal_budget_factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn series_mode(&self) -> SeriesMode {
        if self.hard_fail_series {
            SeriesMode::HardFail
        } else {
            SeriesMode::Lenient
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            ambiguity: self.ambiguity,
        }
    }

    /// Load the catalog once and wrap it in a schedule.
    pub fn load_schedule(&self) -> AppResult<PipeSchedule> {
        let catalog = PipeCatalog::load(&self.catalog_dir)?;
        Ok(PipeSchedule::new(Arc::new(catalog)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: FvConfig = serde_yaml::from_str("catalog_dir: /tmp/pipes\n").unwrap();
        assert_eq!(config, FvConfig::new("/tmp/pipes"));
        assert_eq!(config.series_mode(), SeriesMode::Lenient);
        assert_eq!(config.build_options().ambiguity, AmbiguityPolicy::Resolve);
    }

    #[test]
    fn explicit_fields_are_kept() {
        let yaml = "catalog_dir: pipes\ntolerance: 0.01\ntraversal_budget_factor: 3\nhard_fail_series: true\nambiguity: reject\n";
        let config: FvConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tolerance, 0.01);
        assert_eq!(config.traversal_budget_factor, 3);
        assert_eq!(config.series_mode(), SeriesMode::HardFail);
        assert_eq!(config.ambiguity, AmbiguityPolicy::Reject);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = FvConfig::new("pipes");
        config.tolerance = 0.0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
        let mut config = FvConfig::new("pipes");
        config.traversal_budget_factor = 0;
        assert!(config.validate().is_err());
    }
}
