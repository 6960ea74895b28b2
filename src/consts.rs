use crate::evaluator::Stabilization;

/// Largest accepted deviation of a per-observation probability sum from 1.
pub const NORMALIZATION_TOL: f64 = 1e-9;

pub const DEFAULT_STABILIZATION: Stabilization = Stabilization::MaxShift;
