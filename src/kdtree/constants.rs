//! Named constants of the legacy behavioral contract.

/// Absolute distance tolerance within which two candidates count as a
/// nearest-neighbor tie.
pub const TIE_TOLERANCE: f64 = 0.001;

/// Largest point count a dataset header may declare.
pub const MAX_DATASET_POINTS: usize = 10001;

/// The fixed result capacity of the legacy range search. Kept as the
/// reference value for bounded range queries; the unbounded form grows past
/// it freely.
pub const LEGACY_RESULT_CAPACITY: usize = 100;
