// Deterministic resume-optimization engine (no model calls).
// Pipeline: keyword extraction → gap analysis → transformation → validation → scoring.
// All components are pure, synchronous text functions over the pattern tables.

pub mod gap;
pub mod keywords;
pub mod patterns;
pub mod score;
pub mod transform;
pub mod validate;
