//! Resolve engine (C8): the sole mutator of log/zone state.
//!
//! `resolve` is best-effort — a failed log never aborts the loop. The
//! only early exit is budget exhaustion, via `break`, which leaves
//! already-computed verdicts in place.

use crate::budget::{budget_cost, Budget};
use crate::chain::{epistemic_ok, verify_invariant_only, verify_spot, verify_strict, ChainOutcome};
use crate::domain::{domain_is_active, find_capsule, region_collapsed, Domain};
use crate::entity::{Log, Metric, Mode, RefusalReason, VerificationPolicy, Zone};
use crate::fixed::ratio_from_counts;
use crate::flags::resolve as resolve_flags;

/// Output of [`resolve`]: region-scoped counts plus the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveResult {
    pub region_id: u32,
    pub zone_count: u32,
    pub assignment_count: u32,
    pub policy_count: u32,
    pub hash_link_count: u32,
    pub delta_count: u32,
    pub log_count: u32,
    pub server_mode_count: u32,
    pub delegated_mode_count: u32,
    pub dormant_mode_count: u32,
    pub verification_ok_count: u32,
    pub verification_fail_count: u32,
    /// Raw Q16.16 failure rate over the logs actually scored this call.
    pub failure_rate: i32,
    pub flags: u32,
    pub ok: bool,
    pub refusal_reason: RefusalReason,
    pub budget_used: u32,
    pub budget_max: u32,
}

fn region_matches(entity_region_id: u32, query_region_id: u32) -> bool {
    query_region_id == 0 || entity_region_id == query_region_id
}

fn record_refusal(result: &mut ResolveResult, reason: RefusalReason) {
    if result.refusal_reason == RefusalReason::None {
        result.refusal_reason = reason;
    }
}

/// Pick the effective verification policy for a log: the log's own
/// policy if it names one, else the zone's; within that policy, its
/// declared `verification_policy` if set, else the zone's.
fn effective_verification_policy(domain: &Domain, zone: &Zone, log: &Log) -> VerificationPolicy {
    let policy_id = if log.policy_id != 0 { log.policy_id } else { zone.policy_id };
    let policy = domain.policies.iter().find(|p| p.policy_id == policy_id);
    match policy {
        Some(p) if p.verification_policy != VerificationPolicy::Unset => p.verification_policy,
        _ => zone.verification_policy,
    }
}

/// After a positive verify, a nonzero-on-both-sides count mismatch
/// downgrades the verdict to failure. Zero on either side is not
/// checked (no claim was made).
fn count_integrity_holds(log: &Log, outcome: &ChainOutcome) -> bool {
    let process_ok = log.process_count == 0 || outcome.process_total == 0 || log.process_count == outcome.process_total;
    let rng_ok = log.rng_stream_count == 0 || outcome.rng_total == 0 || log.rng_stream_count == outcome.rng_total;
    process_ok && rng_ok
}

#[must_use]
pub fn resolve(domain: &mut Domain, region_id: u32, _tick: u64, _tick_delta: u64, budget: &mut Budget) -> ResolveResult {
    let mut result = ResolveResult {
        region_id,
        ..ResolveResult::default()
    };

    if !domain_is_active(domain) {
        result.refusal_reason = RefusalReason::DomainInactive;
        result.budget_used = budget.used();
        result.budget_max = budget.max();
        return result;
    }

    let base_cost = budget_cost(domain.policy.cost_analytic);
    if !budget.consume(base_cost) {
        result.refusal_reason = RefusalReason::Budget;
        result.budget_used = budget.used();
        result.budget_max = budget.max();
        return result;
    }

    if region_id != 0 && region_collapsed(domain, region_id) {
        if let Some(capsule) = find_capsule(domain, region_id) {
            result.zone_count = capsule.zone_count;
            result.assignment_count = capsule.assignment_count;
            result.policy_count = capsule.policy_count;
            result.log_count = capsule.log_count;
            result.hash_link_count = capsule.hash_link_count;
            result.delta_count = capsule.delta_count;
            result.verification_ok_count = capsule.verification_ok_count;
            result.verification_fail_count = capsule.verification_fail_count;
            result.flags = resolve_flags::PARTIAL;
            result.ok = true;
            result.budget_used = budget.used();
            result.budget_max = budget.max();
            return result;
        }
    }

    for zone in &domain.zones {
        if region_matches(zone.region_id, region_id) {
            result.zone_count += 1;
            match zone.mode {
                Mode::Server => result.server_mode_count += 1,
                Mode::Delegated => result.delegated_mode_count += 1,
                Mode::Dormant => result.dormant_mode_count += 1,
                Mode::Unset => {}
            }
        }
    }
    for a in &domain.assignments {
        if region_matches(a.region_id, region_id) {
            result.assignment_count += 1;
        }
    }
    for p in &domain.policies {
        if region_matches(p.region_id, region_id) {
            result.policy_count += 1;
        }
    }
    for h in &domain.hash_links {
        if region_matches(h.region_id, region_id) {
            result.hash_link_count += 1;
        }
    }
    for d in &domain.deltas {
        if region_matches(d.region_id, region_id) {
            result.delta_count += 1;
        }
    }

    let log_indices: Vec<usize> = domain
        .logs
        .iter()
        .enumerate()
        .filter(|(_, l)| region_matches(l.region_id, region_id))
        .map(|(i, _)| i)
        .collect();
    result.log_count = log_indices.len() as u32;

    for idx in log_indices {
        let cost = budget_cost(domain.policy.cost_full);
        if !budget.consume(cost) {
            result.flags |= resolve_flags::PARTIAL;
            record_refusal(&mut result, RefusalReason::Budget);
            break;
        }

        domain.logs[idx].flags &= !(Log::VERIFIED | Log::FAILED | Log::EPISTEMIC_MISMATCH);

        let Some(zone_idx) = domain.zones.iter().position(|z| z.srz_id == domain.logs[idx].srz_id) else {
            domain.logs[idx].flags |= Log::FAILED;
            result.verification_fail_count += 1;
            result.flags |= resolve_flags::VERIFICATION_FAILED;
            record_refusal(&mut result, RefusalReason::ZoneMissing);
            continue;
        };

        if !epistemic_ok(&domain.zones[zone_idx], &domain.logs[idx]) {
            domain.logs[idx].flags |= Log::FAILED | Log::EPISTEMIC_MISMATCH;
            result.verification_fail_count += 1;
            result.flags |= resolve_flags::EPISTEMIC_REFUSED | resolve_flags::VERIFICATION_FAILED;
            record_refusal(&mut result, RefusalReason::Epistemic);
            continue;
        }

        if domain.zones[zone_idx].mode == Mode::Dormant {
            result.flags |= resolve_flags::PARTIAL;
            continue;
        }

        let verification_policy = effective_verification_policy(domain, &domain.zones[zone_idx], &domain.logs[idx]);

        let verified = match domain.zones[zone_idx].mode {
            Mode::Server => true,
            Mode::Delegated => match verification_policy {
                VerificationPolicy::Strict => {
                    let outcome = verify_strict(domain, &domain.logs[idx]);
                    result.flags |= resolve_flags::STRICT_APPLIED;
                    outcome.ok && count_integrity_holds(&domain.logs[idx], &outcome)
                }
                VerificationPolicy::Spot => {
                    let outcome = verify_spot(domain, &domain.logs[idx]);
                    result.flags |= resolve_flags::SPOT_APPLIED;
                    outcome.ok && count_integrity_holds(&domain.logs[idx], &outcome)
                }
                VerificationPolicy::InvariantOnly => {
                    let outcome = verify_invariant_only(domain, &domain.logs[idx]);
                    result.flags |= resolve_flags::INVARIANT_ONLY_APPLIED;
                    outcome.ok && count_integrity_holds(&domain.logs[idx], &outcome)
                }
                VerificationPolicy::Unset => false,
            },
            Mode::Unset | Mode::Dormant => false,
        };

        if verified {
            domain.logs[idx].flags |= Log::VERIFIED;
            result.verification_ok_count += 1;
            result.flags |= resolve_flags::VERIFIED;
        } else {
            domain.logs[idx].flags |= Log::FAILED;
            result.verification_fail_count += 1;
            result.flags |= resolve_flags::VERIFICATION_FAILED;
            record_refusal(&mut result, RefusalReason::ProofInvalid);
        }
    }

    result.failure_rate = ratio_from_counts(
        result.verification_fail_count,
        result.verification_ok_count + result.verification_fail_count,
    );

    for zone in &mut domain.zones {
        if !region_matches(zone.region_id, region_id) {
            continue;
        }
        for t in zone.escalation.iter().take(zone.escalation_count as usize) {
            if t.metric == Metric::FailRate && t.value <= result.failure_rate {
                zone.flags |= Zone::ESCALATED;
                result.flags |= resolve_flags::ESCALATED;
            }
        }
        for t in zone.deescalation.iter().take(zone.deescalation_count as usize) {
            if t.metric == Metric::FailRate && t.value >= result.failure_rate {
                zone.flags |= Zone::DEESCALATED;
                result.flags |= resolve_flags::DEESCALATED;
            }
        }
    }

    result.ok = result.verification_fail_count == 0;
    if result.ok {
        result.refusal_reason = RefusalReason::None;
    }
    result.budget_used = budget.used();
    result.budget_max = budget.max();
    result
}
