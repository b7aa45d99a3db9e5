//! Smoothing configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Path smoothing settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmoothingSection {
    /// Catmull-Rom knot exponent (0.5 = centripetal)
    #[serde(default = "defaults::tension")]
    pub tension: f32,

    /// Spline samples per control-point span
    #[serde(default = "defaults::spline_resolution")]
    pub spline_resolution: usize,

    /// Chaikin corner-cutting passes
    #[serde(default = "defaults::chaikin_iterations")]
    pub chaikin_iterations: usize,

    /// Resample loop segments at the map resolution
    #[serde(default = "defaults::enabled")]
    pub loop_resample: bool,
}

impl Default for SmoothingSection {
    fn default() -> Self {
        Self {
            tension: 0.5,
            spline_resolution: 30,
            chaikin_iterations: 3,
            loop_resample: true,
        }
    }
}
