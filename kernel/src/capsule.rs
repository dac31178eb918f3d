//! Collapse / expand (C9) and region capsule lookup (C10).
//!
//! Collapse folds every entity of a region into one [`MacroCapsule`];
//! expand reverses the fold. Both are call-level operations: their
//! failures are structural (wildcard region, full table, absent
//! capsule), not the semantic [`crate::entity::RefusalReason`] carried
//! by queries and `resolve`.

use crate::domain::Domain;
use crate::entity::{Log, MacroCapsule};
use crate::fixed::{hist_bin, hist_bin_ratio, ratio_from_counts, HIST_BINS};
use crate::limits::MAX_CAPSULES;

/// Structural failure for [`collapse_region`] / [`expand_region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsuleFailure {
    /// `region_id == 0` is the "all regions" wildcard, never collapsible.
    WildcardRegion,
    /// The capsule table is at [`MAX_CAPSULES`].
    CapsuleTableFull,
    /// No capsule exists for this `region_id`.
    NotCollapsed,
}

/// Fold every entity of `region_id` into a single [`MacroCapsule`].
///
/// Idempotent: collapsing an already-collapsed region returns `Ok(())`
/// without appending a duplicate capsule.
///
/// # Errors
///
/// Returns [`CapsuleFailure::WildcardRegion`] for `region_id == 0`, or
/// [`CapsuleFailure::CapsuleTableFull`] if the table has reached
/// [`MAX_CAPSULES`].
pub fn collapse_region(domain: &mut Domain, region_id: u32) -> Result<(), CapsuleFailure> {
    if region_id == 0 {
        return Err(CapsuleFailure::WildcardRegion);
    }
    if crate::domain::region_collapsed(domain, region_id) {
        return Ok(());
    }
    if domain.capsules.len() >= MAX_CAPSULES {
        return Err(CapsuleFailure::CapsuleTableFull);
    }

    let zone_count = domain.zones.iter().filter(|z| z.region_id == region_id).count() as u32;
    let assignment_count = domain
        .assignments
        .iter()
        .filter(|a| a.region_id == region_id)
        .count() as u32;
    let policy_count = domain.policies.iter().filter(|p| p.region_id == region_id).count() as u32;
    let hash_link_count = domain.hash_links.iter().filter(|h| h.region_id == region_id).count() as u32;
    let delta_count = domain.deltas.iter().filter(|d| d.region_id == region_id).count() as u32;

    let mut log_count = 0u32;
    let mut verification_ok_count = 0u32;
    let mut verification_fail_count = 0u32;
    for log in domain.logs.iter().filter(|l| l.region_id == region_id) {
        log_count += 1;
        if log.flags & Log::VERIFIED != 0 {
            verification_ok_count += 1;
        }
        if log.flags & Log::FAILED != 0 {
            verification_fail_count += 1;
        }
    }

    let failure_rate = ratio_from_counts(verification_fail_count, verification_ok_count + verification_fail_count);
    let mut failure_hist = [0i32; HIST_BINS];
    failure_hist[hist_bin(failure_rate)] = hist_bin_ratio(zone_count, zone_count);

    domain.capsules.push(MacroCapsule {
        capsule_id: u64::from(region_id),
        region_id,
        zone_count,
        assignment_count,
        policy_count,
        log_count,
        hash_link_count,
        delta_count,
        verification_ok_count,
        verification_fail_count,
        failure_hist,
        rng_cursor: [0; HIST_BINS],
    });
    Ok(())
}

/// Remove the capsule for `region_id`, restoring the region to live
/// queries. Not idempotent: refuses if no capsule exists. Uses
/// swap-remove, so capsule order is not preserved across expansions.
///
/// # Errors
///
/// Returns [`CapsuleFailure::NotCollapsed`] if no capsule matches.
pub fn expand_region(domain: &mut Domain, region_id: u32) -> Result<(), CapsuleFailure> {
    match domain.capsules.iter().position(|c| c.region_id == region_id) {
        Some(idx) => {
            domain.capsules.swap_remove(idx);
            Ok(())
        }
        None => Err(CapsuleFailure::NotCollapsed),
    }
}

#[must_use]
pub fn capsule_count(domain: &Domain) -> usize {
    domain.capsules.len()
}

#[must_use]
pub fn capsule_at(domain: &Domain, index: usize) -> Option<&MacroCapsule> {
    domain.capsules.get(index)
}
