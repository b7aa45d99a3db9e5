//! YAML planning scene files.
//!
//! A scene file is a serialized [`PlanningScene`]; every section is optional
//! and falls back to its default:
//!
//! ```yaml
//! map: { width: 40, height: 30, resolution: 10.0 }
//! robot: { width: 20.0, height: 20.0 }
//! obstacles:
//!   - { x: 150.0, y: 0.0, width: 20.0, height: 220.0 }
//! waypoints:
//!   - position: { x: 250.0, y: 250.0 }
//!     mode: aggressive
//! start: { x: 15.0, y: 15.0 }
//! goal: { x: 385.0, y: 285.0 }
//! ```

use std::path::Path;

use log::debug;

use crate::core::PlanningScene;

/// Error type for scene loading
#[derive(Debug, Clone)]
pub enum SceneError {
    /// I/O error
    Io(String),
    /// YAML parse error
    Parse(String),
    /// Parsed, but not a usable scene
    Invalid(String),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Io(msg) => write!(f, "I/O error: {}", msg),
            SceneError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SceneError::Invalid(msg) => write!(f, "Invalid scene: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {}

/// Load and validate a scene from a YAML file
pub fn load_scene(path: &Path) -> Result<PlanningScene, SceneError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SceneError::Io(e.to_string()))?;
    let scene = scene_from_yaml(&contents)?;
    debug!(
        "[Scene] Loaded {}: {}x{} cells, {} obstacles, {} waypoints",
        path.display(),
        scene.map.width,
        scene.map.height,
        scene.obstacles.len(),
        scene.waypoints.len()
    );
    Ok(scene)
}

/// Parse and validate a scene from a YAML string
pub fn scene_from_yaml(yaml: &str) -> Result<PlanningScene, SceneError> {
    let scene: PlanningScene =
        serde_yaml::from_str(yaml).map_err(|e| SceneError::Parse(e.to_string()))?;
    validate_scene(&scene)?;
    Ok(scene)
}

/// Reject scenes no planner can make sense of.
///
/// A non-positive resolution is allowed: planning reports it as a
/// degenerate grid instead.
pub fn validate_scene(scene: &PlanningScene) -> Result<(), SceneError> {
    if !scene.map.resolution.is_finite() {
        return Err(SceneError::Invalid("map resolution is not finite".into()));
    }
    if !(scene.robot.width >= 0.0 && scene.robot.height >= 0.0) {
        return Err(SceneError::Invalid(format!(
            "robot footprint {}x{} must be non-negative",
            scene.robot.width, scene.robot.height
        )));
    }
    for (i, rect) in scene.obstacles.iter().enumerate() {
        let finite = [rect.x, rect.y, rect.width, rect.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || rect.width < 0.0 || rect.height < 0.0 {
            return Err(SceneError::Invalid(format!(
                "obstacle {} has a bad extent {:?}",
                i, rect
            )));
        }
    }
    let points = scene
        .waypoints
        .iter()
        .map(|w| w.position)
        .chain(scene.start)
        .chain(scene.goal);
    for p in points {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(SceneError::Invalid(format!("point {:?} is not finite", p)));
        }
    }
    Ok(())
}
