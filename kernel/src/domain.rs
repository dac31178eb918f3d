//! Domain lifecycle and entity tables (C3, C4).
//!
//! A `Domain` owns every table for one simulation world: it is created
//! exclusively by [`domain_init`], mutated by [`crate::resolve::resolve`]
//! (log flags, zone escalation bits) and by [`crate::capsule`] (the
//! capsule list), and destroyed by [`domain_free`]. Lookup by primary
//! key is a linear scan — determinism, not throughput, is the
//! priority (`SPEC_FULL.md` design notes).

use crate::entity::{ArchivalState, Assignment, ExistenceState, HashLink, Log, MacroCapsule, Policy, StateDelta, Zone};
use crate::limits::{MAX_ASSIGNMENTS, MAX_DELTAS, MAX_HASH_LINKS, MAX_LOGS, MAX_POLICIES, MAX_ZONES};
use crate::surface::{DomainPolicy, SurfaceDescription};

/// The container owning all tables and capsules for one simulation world.
#[derive(Debug, Clone)]
pub struct Domain {
    pub domain_id: u64,
    pub world_seed: u64,
    pub meters_per_unit: i32,
    pub policy: DomainPolicy,
    pub existence_state: ExistenceState,
    pub archival_state: ArchivalState,
    pub authoring_version: u32,
    pub zones: Vec<Zone>,
    pub assignments: Vec<Assignment>,
    pub policies: Vec<Policy>,
    pub logs: Vec<Log>,
    pub hash_links: Vec<HashLink>,
    pub deltas: Vec<StateDelta>,
    pub capsules: Vec<MacroCapsule>,
}

/// `DomainInit(surface)`: clamps each table to its compile-time
/// maximum, copies the description's entities by value, and sets
/// `existence = Realized`, `archival = Live`, `authoring_version = 1`.
/// No defaults override what the description supplies.
#[must_use]
pub fn domain_init(surface: SurfaceDescription) -> Domain {
    Domain {
        domain_id: surface.domain_id,
        world_seed: surface.world_seed,
        meters_per_unit: surface.meters_per_unit,
        policy: DomainPolicy::default(),
        existence_state: ExistenceState::Realized,
        archival_state: ArchivalState::Live,
        authoring_version: 1,
        zones: surface.zones.into_iter().take(MAX_ZONES).collect(),
        assignments: surface.assignments.into_iter().take(MAX_ASSIGNMENTS).collect(),
        policies: surface.policies.into_iter().take(MAX_POLICIES).collect(),
        logs: surface.logs.into_iter().take(MAX_LOGS).collect(),
        hash_links: surface.hash_links.into_iter().take(MAX_HASH_LINKS).collect(),
        deltas: surface.deltas.into_iter().take(MAX_DELTAS).collect(),
        capsules: Vec::new(),
    }
}

/// `DomainFree`: logical free. Clears every table and the capsule
/// list; does not otherwise observe the domain's identity fields.
pub fn domain_free(domain: &mut Domain) {
    domain.zones.clear();
    domain.assignments.clear();
    domain.policies.clear();
    domain.logs.clear();
    domain.hash_links.clear();
    domain.deltas.clear();
    domain.capsules.clear();
}

pub fn domain_set_state(domain: &mut Domain, existence: ExistenceState, archival: ArchivalState) {
    domain.existence_state = existence;
    domain.archival_state = archival;
}

pub fn domain_set_policy(domain: &mut Domain, policy: DomainPolicy) {
    domain.policy = policy;
}

/// False iff `existence_state` is `Nonexistent` or `Declared`.
#[must_use]
pub fn domain_is_active(domain: &Domain) -> bool {
    !matches!(
        domain.existence_state,
        ExistenceState::Nonexistent | ExistenceState::Declared
    )
}

#[must_use]
pub fn find_zone_index(domain: &Domain, srz_id: u32) -> Option<usize> {
    domain.zones.iter().position(|z| z.srz_id == srz_id)
}

#[must_use]
pub fn find_assignment_index(domain: &Domain, assignment_id: u32) -> Option<usize> {
    domain.assignments.iter().position(|a| a.assignment_id == assignment_id)
}

#[must_use]
pub fn find_policy_index(domain: &Domain, policy_id: u32) -> Option<usize> {
    domain.policies.iter().position(|p| p.policy_id == policy_id)
}

#[must_use]
pub fn find_log_index(domain: &Domain, log_id: u32) -> Option<usize> {
    domain.logs.iter().position(|l| l.log_id == log_id)
}

#[must_use]
pub fn find_hash_link_index(domain: &Domain, link_id: u32) -> Option<usize> {
    domain.hash_links.iter().position(|h| h.link_id == link_id)
}

#[must_use]
pub fn find_delta_index(domain: &Domain, delta_id: u32) -> Option<usize> {
    domain.deltas.iter().position(|d| d.delta_id == delta_id)
}

/// A region with `region_id == 0` is never collapsed (0 is the
/// "all regions" wildcard, not a real region).
#[must_use]
pub fn region_collapsed(domain: &Domain, region_id: u32) -> bool {
    region_id != 0 && domain.capsules.iter().any(|c| c.region_id == region_id)
}

#[must_use]
pub fn find_capsule(domain: &Domain, region_id: u32) -> Option<&MacroCapsule> {
    domain.capsules.iter().find(|c| c.region_id == region_id)
}
