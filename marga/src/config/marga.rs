//! Main MargaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pathfinding::{AStarConfig, RouteConfig};

use super::error::ConfigLoadError;
use super::planner::PlannerSection;
use super::smoothing::SmoothingSection;

/// Full Marga configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct MargaConfig {
    /// Grid and search settings
    #[serde(default)]
    pub planner: PlannerSection,

    /// Smoothing settings
    #[serde(default)]
    pub smoothing: SmoothingSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert to AStarConfig
    pub fn to_astar_config(&self) -> AStarConfig {
        AStarConfig {
            detour_factor: self.planner.detour_factor,
            detour_margin: self.planner.detour_margin,
            safety_weight: self.planner.safety_weight,
            progress_interval: self.planner.progress_interval,
        }
    }

    /// Convert to RouteConfig
    pub fn to_route_config(&self) -> RouteConfig {
        RouteConfig {
            pathfinding_mode: self.planner.pathfinding_mode,
            safety_threshold: self.planner.safety_threshold,
            edge_threshold: self.planner.edge_threshold,
            tension: self.smoothing.tension,
            spline_resolution: self.smoothing.spline_resolution,
            loop_resample: self.smoothing.loop_resample,
        }
    }
}
