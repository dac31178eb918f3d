//! Surface Description: the one-shot input to `domain_init` (§3, §6
//! `SurfaceDescInit`).
//!
//! Callers build a `SurfaceDescription` once (typically from a fixture
//! or a host-engine snapshot), then hand it to [`crate::domain::domain_init`]
//! to populate the entity tables. Counts are clamped to the compile-time
//! maxima in [`crate::limits`] during init, not here — this type itself
//! places no bound on how many entities a caller appends.

use crate::entity::{Assignment, HashLink, Log, Policy, StateDelta, Zone};

/// Default per-query-kind unit costs installed by `domain_init` before
/// any `DomainSetPolicy` override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainPolicy {
    pub cost_full: u32,
    pub cost_medium: u32,
    pub cost_coarse: u32,
    pub cost_analytic: u32,
}

impl Default for DomainPolicy {
    fn default() -> Self {
        Self {
            cost_full: 1,
            cost_medium: 1,
            cost_coarse: 1,
            cost_analytic: 1,
        }
    }
}

/// A zeroed/default `SurfaceDescription`, per `SurfaceDescInit`.
#[derive(Debug, Clone, Default)]
pub struct SurfaceDescription {
    pub domain_id: u64,
    pub world_seed: u64,
    pub meters_per_unit: i32,
    pub zones: Vec<Zone>,
    pub assignments: Vec<Assignment>,
    pub policies: Vec<Policy>,
    pub logs: Vec<Log>,
    pub hash_links: Vec<HashLink>,
    pub deltas: Vec<StateDelta>,
}

impl SurfaceDescription {
    #[must_use]
    pub fn new(domain_id: u64, world_seed: u64, meters_per_unit: i32) -> Self {
        Self {
            domain_id,
            world_seed,
            meters_per_unit,
            ..Self::default()
        }
    }
}
