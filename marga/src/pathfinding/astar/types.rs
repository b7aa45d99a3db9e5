//! A* pathfinding types.

use crate::core::{GridCoord, WorldPoint};
use std::cmp::Ordering;

/// Cost of an orthogonal step
pub const ORTHOGONAL_COST: i64 = 10;

/// Cost of a diagonal step
pub const DIAGONAL_COST: i64 = 15;

/// Diagonal weight used by the octile heuristic
pub const HEURISTIC_DIAGONAL: i64 = 14;

/// Octile heuristic between two cells.
///
/// Weights diagonals at [`HEURISTIC_DIAGONAL`] while a diagonal step costs
/// [`DIAGONAL_COST`]. Changing either constant changes which paths win ties.
#[inline]
pub fn heuristic(a: GridCoord, b: GridCoord) -> i64 {
    let dx = (a.x - b.x).abs() as i64;
    let dy = (a.y - b.y).abs() as i64;
    ORTHOGONAL_COST * (dx + dy) + (HEURISTIC_DIAGONAL - 2 * ORTHOGONAL_COST) * dx.min(dy)
}

/// Open-set entry. Ordered so a `BinaryHeap` pops the lowest `f`, then the
/// lowest `h`.
#[derive(Clone, Copy, Debug)]
pub(super) struct OpenEntry {
    pub index: usize,
    pub g_cost: i64,
    pub h_cost: i64,
}

impl OpenEntry {
    #[inline]
    pub fn f_cost(&self) -> i64 {
        self.g_cost + self.h_cost
    }
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost()
            .cmp(&self.f_cost())
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-cell search record, stored in an arena indexed by flat grid index.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct SearchNode {
    pub g_cost: i64,
    pub parent: Option<usize>,
    pub opened: bool,
    pub closed: bool,
}

/// A* pathfinding configuration
#[derive(Clone, Debug, PartialEq)]
pub struct AStarConfig {
    /// Allowed detour as a multiple of the straight-line heuristic
    pub detour_factor: f32,
    /// Extra corridor slack in cells
    pub detour_margin: i32,
    /// Numerator of the clearance penalty `W / (d + 1)^2`
    pub safety_weight: f64,
    /// Expansions between progress reports
    pub progress_interval: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            detour_factor: 1.6,
            detour_margin: 8,
            safety_weight: 5e5,
            progress_interval: 1024,
        }
    }
}

impl AStarConfig {
    /// Create with a custom corridor
    pub fn with_detour(detour_factor: f32, detour_margin: i32) -> Self {
        Self {
            detour_factor,
            detour_margin,
            ..Default::default()
        }
    }

    /// Corridor cost limit for a search whose straight-line heuristic is `lower_bound`
    #[inline]
    pub fn corridor_limit(&self, lower_bound: i64) -> i64 {
        (self.detour_factor * lower_bound as f32) as i64 + self.detour_margin as i64 * ORTHOGONAL_COST
    }
}

/// Result of A* pathfinding
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Path as grid coordinates (empty if no path found)
    pub path_grid: Vec<GridCoord>,
    /// Path as world coordinates (cell centres)
    pub path_world: Vec<WorldPoint>,
    /// Total path cost (`i64::MAX` on failure)
    pub cost: i64,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Cells closed by the search, in expansion order
    pub visited: Vec<GridCoord>,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    /// Create a failed result
    pub(super) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path_grid: Vec::new(),
            path_world: Vec::new(),
            cost: i64::MAX,
            nodes_expanded,
            visited: Vec::new(),
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Path length in cells
    pub fn length_cells(&self) -> usize {
        self.path_grid.len()
    }

    /// Path length in world units
    pub fn length_world(&self) -> f32 {
        self.path_world
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// First cell of the path (the start after repair)
    pub fn start(&self) -> Option<GridCoord> {
        self.path_grid.first().copied()
    }

    /// Last cell of the path (the goal after repair)
    pub fn goal(&self) -> Option<GridCoord> {
        self.path_grid.last().copied()
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// The grid has no cells
    DegenerateGrid,
    /// Start or goal is outside the grid
    OutOfBounds,
    /// Start or goal is blocked and no free cell is reachable from it
    NoFreeCell,
    /// Open set exhausted inside the corridor
    NoPath,
}

impl std::fmt::Display for PathFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathFailure::DegenerateGrid => write!(f, "grid has no cells"),
            PathFailure::OutOfBounds => write!(f, "start or goal outside the grid"),
            PathFailure::NoFreeCell => write!(f, "no free cell near a blocked endpoint"),
            PathFailure::NoPath => write!(f, "no path within the search corridor"),
        }
    }
}
