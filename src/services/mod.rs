// Business logic for the two dashboard pages. Pure derivation functions
// live here; commands own the locks.

pub mod analytics;
pub mod appointments;
pub mod export;
