//! Physical constants and simulation defaults.

/// Default gravity, applied as a constant per-point force (not an acceleration).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -0.1, 0.0];

/// Default simulation timestep (seconds).
pub const DEFAULT_DT: f32 = 0.02;

/// Default structural spring stiffness `k`.
pub const DEFAULT_STIFFNESS: f32 = 100.0;

/// Default structural spring damping `kv`.
pub const DEFAULT_DAMPING: f32 = 20.0;

/// Default mass of every point.
pub const DEFAULT_MASS: f32 = 1.0;

/// Default spring rest length (also the initial grid spacing).
pub const DEFAULT_REST_LENGTH: f32 = 0.25;

/// Default aerodynamic drag coefficient.
pub const DEFAULT_DRAG: f32 = 1.5;

/// Drag weighting of the first triangle of every grid cell.
pub const DRAG_WEIGHT_FIRST: f32 = 0.5;

/// Drag weighting of the second triangle of every grid cell.
pub const DRAG_WEIGHT_SECOND: f32 = 0.75;

/// Epsilon for floating-point comparisons.
/// Springs no longer than this contribute no force; UV determinants no
/// larger than this contribute no tangent.
pub const EPSILON: f32 = 1.0e-7;

/// Cross products (twice the triangle area) and accumulated normals or
/// tangents at or below this length are treated as degenerate.
pub const DEGENERATE_LENGTH: f32 = 1.0e-10;
