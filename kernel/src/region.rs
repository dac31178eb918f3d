//! Region aggregator (C6): a budget-checked scan over all entities in
//! a region, or — if the region is collapsed — its capsule's counts.

use crate::budget::{budget_cost, Budget};
use crate::domain::{domain_is_active, find_capsule, region_collapsed, Domain};
use crate::entity::{Mode, RefusalReason};
use crate::fixed::ratio_from_counts;
use crate::flags::resolve as resolve_flags;
use crate::query::{QueryConfidence, QueryMeta, QueryResolution};

/// Aggregate counts and failure rate for a region, or for the whole
/// domain when `region_id == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionSample {
    pub region_id: u32,
    pub zone_count: u32,
    pub assignment_count: u32,
    pub policy_count: u32,
    pub log_count: u32,
    pub hash_link_count: u32,
    pub delta_count: u32,
    pub server_mode_count: u32,
    pub delegated_mode_count: u32,
    pub dormant_mode_count: u32,
    pub verification_ok_count: u32,
    pub verification_fail_count: u32,
    /// Raw Q16.16 failure rate.
    pub failure_rate: i32,
    pub flags: u32,
    pub meta: QueryMeta,
}

/// `region_id == 0` is a wildcard meaning "all regions".
fn region_matches(entity_region_id: u32, query_region_id: u32) -> bool {
    query_region_id == 0 || entity_region_id == query_region_id
}

#[must_use]
pub fn region_query(domain: &Domain, region_id: u32, budget: &mut Budget) -> RegionSample {
    let mut sample = RegionSample {
        region_id,
        ..RegionSample::default()
    };

    if !domain_is_active(domain) {
        sample.meta = QueryMeta::refused(RefusalReason::DomainInactive, budget);
        return sample;
    }

    let cost = budget_cost(domain.policy.cost_analytic);
    if !budget.consume(cost) {
        sample.meta = QueryMeta::refused(RefusalReason::Budget, budget);
        return sample;
    }

    if region_id != 0 && region_collapsed(domain, region_id) {
        if let Some(capsule) = find_capsule(domain, region_id) {
            sample.zone_count = capsule.zone_count;
            sample.assignment_count = capsule.assignment_count;
            sample.policy_count = capsule.policy_count;
            sample.log_count = capsule.log_count;
            sample.hash_link_count = capsule.hash_link_count;
            sample.delta_count = capsule.delta_count;
            sample.verification_ok_count = capsule.verification_ok_count;
            sample.verification_fail_count = capsule.verification_fail_count;
            sample.flags = resolve_flags::PARTIAL;
            sample.meta = QueryMeta::ok(QueryResolution::Analytic, QueryConfidence::Unknown, cost, budget);
            return sample;
        }
    }

    for zone in &domain.zones {
        if region_matches(zone.region_id, region_id) {
            sample.zone_count += 1;
            match zone.mode {
                Mode::Server => sample.server_mode_count += 1,
                Mode::Delegated => sample.delegated_mode_count += 1,
                Mode::Dormant => sample.dormant_mode_count += 1,
                Mode::Unset => {}
            }
        }
    }
    for assignment in &domain.assignments {
        if region_matches(assignment.region_id, region_id) {
            sample.assignment_count += 1;
        }
    }
    for policy in &domain.policies {
        if region_matches(policy.region_id, region_id) {
            sample.policy_count += 1;
        }
    }
    for log in &domain.logs {
        if region_matches(log.region_id, region_id) {
            sample.log_count += 1;
            if log.flags & crate::entity::Log::VERIFIED != 0 {
                sample.verification_ok_count += 1;
            }
            if log.flags & crate::entity::Log::FAILED != 0 {
                sample.verification_fail_count += 1;
            }
        }
    }
    for link in &domain.hash_links {
        if region_matches(link.region_id, region_id) {
            sample.hash_link_count += 1;
        }
    }
    for delta in &domain.deltas {
        if region_matches(delta.region_id, region_id) {
            sample.delta_count += 1;
        }
    }

    sample.failure_rate = ratio_from_counts(
        sample.verification_fail_count,
        sample.verification_ok_count + sample.verification_fail_count,
    );
    sample.flags = 0;
    sample.meta = QueryMeta::ok(QueryResolution::Analytic, QueryConfidence::Exact, cost, budget);
    sample
}
