//! The five fixture commands: `validate`, `inspect`, `resolve`,
//! `collapse`, `expand`. Each prints a versioned header followed by
//! `key=value` lines and returns a process exit code.

use srz_kernel::budget::Budget;
use srz_kernel::capsule::{capsule_count, collapse_region, expand_region};
use srz_kernel::domain::{domain_free, domain_init, domain_set_policy, domain_set_state};
use srz_kernel::entity::{ArchivalState, ExistenceState};
use srz_kernel::fixed::RATIO_ONE;
use srz_kernel::limits::{MAX_ASSIGNMENTS, MAX_DELTAS, MAX_HASH_LINKS, MAX_LOGS, MAX_POLICIES, MAX_ZONES};
use srz_kernel::query::{assignment_query, log_query, policy_query, zone_query};
use srz_kernel::region::region_query;
use srz_kernel::resolve::resolve;

use crate::fixture::{Fixture, PROVIDER_CHAIN};
use crate::hash::{fnv32, fold_u32, fold_u64, FNV64_OFFSET};

pub const VALIDATE_HEADER: &str = "DOMINIUM_SRZ_VALIDATE_V1";
pub const INSPECT_HEADER: &str = "DOMINIUM_SRZ_INSPECT_V1";
pub const RESOLVE_HEADER: &str = "DOMINIUM_SRZ_RESOLVE_V1";
pub const COLLAPSE_HEADER: &str = "DOMINIUM_SRZ_COLLAPSE_V1";
pub const EXPAND_HEADER: &str = "DOMINIUM_SRZ_EXPAND_V1";

fn ratio_valid(v: i32) -> bool {
    (0..=RATIO_ONE).contains(&v)
}

/// The fixture's own structural checks: bounded counts, required
/// cross-references, and Q16.16 ratios in range. Independent of the
/// kernel, since a fixture can be malformed before a `Domain` ever
/// exists.
#[must_use]
pub fn validate_fixture(fixture: &Fixture) -> bool {
    if fixture.zone_count as usize > MAX_ZONES
        || fixture.assignment_count as usize > MAX_ASSIGNMENTS
        || fixture.policy_count as usize > MAX_POLICIES
        || fixture.log_count as usize > MAX_LOGS
        || fixture.hash_link_count as usize > MAX_HASH_LINKS
        || fixture.delta_count as usize > MAX_DELTAS
    {
        return false;
    }

    let zone_exists = |id: u32| id != 0 && fixture.zones.iter().take(fixture.zone_count as usize).any(|z| z.srz_id == id);
    let log_exists = |id: u32| id != 0 && fixture.logs.iter().take(fixture.log_count as usize).any(|l| l.log_id == id);
    let chain_exists = |id: u32| id != 0 && fixture.logs.iter().take(fixture.log_count as usize).any(|l| l.chain_id == id);

    for zone in fixture.zones.iter().take(fixture.zone_count as usize) {
        if zone.srz_id == 0
            || zone.mode == srz_kernel::entity::Mode::Unset
            || zone.verification_policy == srz_kernel::entity::VerificationPolicy::Unset
            || zone.domain_count as usize > zone.domain_ids.len()
        {
            return false;
        }
        for t in zone.escalation.iter().take(zone.escalation_count as usize) {
            if t.metric == srz_kernel::entity::Metric::Unset || !ratio_valid(t.value) {
                return false;
            }
        }
        for t in zone.deescalation.iter().take(zone.deescalation_count as usize) {
            if t.metric == srz_kernel::entity::Metric::Unset || !ratio_valid(t.value) {
                return false;
            }
        }
    }
    for assignment in fixture.assignments.iter().take(fixture.assignment_count as usize) {
        if assignment.assignment_id == 0 || !zone_exists(assignment.srz_id) {
            return false;
        }
        if assignment.expiry_tick != 0 && assignment.start_tick > assignment.expiry_tick {
            return false;
        }
    }
    for policy in fixture.policies.iter().take(fixture.policy_count as usize) {
        if policy.policy_id == 0
            || policy.verification_policy == srz_kernel::entity::VerificationPolicy::Unset
            || !ratio_valid(policy.spot_check_rate)
        {
            return false;
        }
    }
    for log in fixture.logs.iter().take(fixture.log_count as usize) {
        if log.log_id == 0 || !zone_exists(log.srz_id) {
            return false;
        }
    }
    for link in fixture.hash_links.iter().take(fixture.hash_link_count as usize) {
        if link.link_id == 0 || (link.chain_id != 0 && !chain_exists(link.chain_id)) {
            return false;
        }
    }
    for delta in fixture.deltas.iter().take(fixture.delta_count as usize) {
        if delta.delta_id == 0 || (delta.log_id != 0 && !log_exists(delta.log_id)) {
            return false;
        }
    }
    true
}

/// Exit code: 0 if the fixture is structurally valid, else 1.
pub fn run_validate(fixture: &Fixture) -> i32 {
    let ok = validate_fixture(fixture);
    println!("{VALIDATE_HEADER}");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("zone_count={}", fixture.zone_count);
    println!("assignment_count={}", fixture.assignment_count);
    println!("policy_count={}", fixture.policy_count);
    println!("log_count={}", fixture.log_count);
    println!("hash_link_count={}", fixture.hash_link_count);
    println!("delta_count={}", fixture.delta_count);
    println!("ok={}", u32::from(ok));
    i32::from(!ok)
}

fn build_domain(fixture: &Fixture) -> srz_kernel::domain::Domain {
    let mut domain = domain_init(fixture.surface());
    if let Some(policy) = fixture.policy_override {
        domain_set_policy(&mut domain, policy);
    }
    domain
}

pub fn run_inspect_zone(fixture: &Fixture, name: &str, budget_max: u32) -> i32 {
    let mut domain = build_domain(fixture);
    let mut budget = Budget::new(budget_max);
    let sample = zone_query(&domain, fnv32(name), &mut budget);

    println!("{INSPECT_HEADER}");
    println!("entity=zone");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("srz_id={}", sample.entity.srz_id);
    println!("srz_id_str={}", fixture.zone_names.get(&sample.entity.srz_id).map_or("", String::as_str));
    println!("domain_count={}", sample.entity.domain_count);
    println!("mode={}", sample.entity.mode.to_u32());
    println!("verification_policy={}", sample.entity.verification_policy.to_u32());
    println!("escalation_count={}", sample.entity.escalation_count);
    println!("deescalation_count={}", sample.entity.deescalation_count);
    println!("epistemic_scope_id={}", sample.entity.epistemic_scope_id);
    println!("policy_id={}", sample.entity.policy_id);
    println!("flags={}", sample.entity.flags);
    print_meta(&sample.meta);

    domain_free(&mut domain);
    0
}

pub fn run_inspect_assignment(fixture: &Fixture, name: &str, budget_max: u32) -> i32 {
    let mut domain = build_domain(fixture);
    let mut budget = Budget::new(budget_max);
    let sample = assignment_query(&domain, fnv32(name), &mut budget);

    println!("{INSPECT_HEADER}");
    println!("entity=assignment");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("assignment_id={}", sample.entity.assignment_id);
    println!(
        "assignment_id_str={}",
        fixture.assignment_names.get(&sample.entity.assignment_id).map_or("", String::as_str)
    );
    println!("srz_id={}", sample.entity.srz_id);
    println!("executor_id={}", sample.entity.executor_id);
    println!("authority_token_id={}", sample.entity.authority_token_id);
    println!("capability_baseline_id={}", sample.entity.capability_baseline_id);
    println!("start_tick={}", sample.entity.start_tick);
    println!("expiry_tick={}", sample.entity.expiry_tick);
    println!("flags={}", sample.entity.flags);
    print_meta(&sample.meta);

    domain_free(&mut domain);
    0
}

pub fn run_inspect_policy(fixture: &Fixture, name: &str, budget_max: u32) -> i32 {
    let mut domain = build_domain(fixture);
    let mut budget = Budget::new(budget_max);
    let sample = policy_query(&domain, fnv32(name), &mut budget);

    println!("{INSPECT_HEADER}");
    println!("entity=policy");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("policy_id={}", sample.entity.policy_id);
    println!("policy_id_str={}", fixture.policy_names.get(&sample.entity.policy_id).map_or("", String::as_str));
    println!("verification_policy={}", sample.entity.verification_policy.to_u32());
    println!("spot_check_rate_q16={}", sample.entity.spot_check_rate);
    println!("strict_replay_interval={}", sample.entity.strict_replay_interval);
    println!("max_segment_ticks={}", sample.entity.max_segment_ticks);
    println!("flags={}", sample.entity.flags);
    print_meta(&sample.meta);

    domain_free(&mut domain);
    0
}

pub fn run_inspect_log(fixture: &Fixture, name: &str, budget_max: u32) -> i32 {
    let mut domain = build_domain(fixture);
    let mut budget = Budget::new(budget_max);
    let sample = log_query(&domain, fnv32(name), &mut budget);

    println!("{INSPECT_HEADER}");
    println!("entity=log");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("log_id={}", sample.entity.log_id);
    println!("log_id_str={}", fixture.log_names.get(&sample.entity.log_id).map_or("", String::as_str));
    println!("srz_id={}", sample.entity.srz_id);
    println!("assignment_id={}", sample.entity.assignment_id);
    println!("policy_id={}", sample.entity.policy_id);
    println!("chain_id={}", sample.entity.chain_id);
    println!("delta_id={}", sample.entity.delta_id);
    println!("start_tick={}", sample.entity.start_tick);
    println!("end_tick={}", sample.entity.end_tick);
    println!("process_count={}", sample.entity.process_count);
    println!("rng_stream_count={}", sample.entity.rng_stream_count);
    println!("epistemic_scope_id={}", sample.entity.epistemic_scope_id);
    println!("flags={}", sample.entity.flags);
    print_meta(&sample.meta);

    domain_free(&mut domain);
    0
}

pub fn run_inspect_region(fixture: &Fixture, region_name: &str, budget_max: u32) -> i32 {
    let mut domain = build_domain(fixture);
    let mut budget = Budget::new(budget_max);
    let region_id = fixture.region_id(region_name);
    let sample = region_query(&domain, region_id, &mut budget);

    println!("{INSPECT_HEADER}");
    println!("entity=region");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("region_id={}", sample.region_id);
    println!("zone_count={}", sample.zone_count);
    println!("assignment_count={}", sample.assignment_count);
    println!("policy_count={}", sample.policy_count);
    println!("log_count={}", sample.log_count);
    println!("hash_link_count={}", sample.hash_link_count);
    println!("delta_count={}", sample.delta_count);
    println!("server_mode_count={}", sample.server_mode_count);
    println!("delegated_mode_count={}", sample.delegated_mode_count);
    println!("dormant_mode_count={}", sample.dormant_mode_count);
    println!("verification_ok_count={}", sample.verification_ok_count);
    println!("verification_fail_count={}", sample.verification_fail_count);
    println!("failure_rate_q16={}", sample.failure_rate);
    println!("flags={}", sample.flags);
    print_meta(&sample.meta);

    domain_free(&mut domain);
    0
}

fn print_meta(meta: &srz_kernel::query::QueryMeta) {
    println!("meta.status={}", meta.status as u32);
    println!("meta.resolution={}", meta.resolution as u32);
    println!("meta.confidence={}", meta.confidence as u32);
    println!("meta.refusal_reason={}", meta.refusal_reason.to_u32());
    println!("meta.cost_units={}", meta.cost_units);
    println!("budget.used={}", meta.budget_used);
    println!("budget.max={}", meta.budget_max);
}

/// `resolve_hash`: a position-independent digest over the domain's
/// full zone/log/hash-link/delta tables after a resolve sweep, not
/// scoped to the resolved region. Lets two fixture runs be compared
/// for exact state equality without printing every entity.
fn resolve_hash(domain: &srz_kernel::domain::Domain) -> u64 {
    let mut agg: u64 = 0;
    for zone in &domain.zones {
        let mut h = FNV64_OFFSET;
        h = fold_u32(h, zone.srz_id);
        h = fold_u32(h, zone.mode.to_u32());
        h = fold_u32(h, zone.verification_policy.to_u32());
        h = fold_u32(h, zone.epistemic_scope_id);
        agg = agg.wrapping_add(h);
    }
    for log in &domain.logs {
        let mut h = FNV64_OFFSET;
        h = fold_u32(h, log.log_id);
        h = fold_u32(h, log.chain_id);
        h = fold_u32(h, log.process_count);
        h = fold_u32(h, log.rng_stream_count);
        h = fold_u32(h, log.flags);
        agg = agg.wrapping_add(h);
    }
    for link in &domain.hash_links {
        let mut h = FNV64_OFFSET;
        h = fold_u32(h, link.link_id);
        h = fold_u64(h, link.hash);
        h = fold_u64(h, link.prev_hash);
        agg = agg.wrapping_add(h);
    }
    for delta in &domain.deltas {
        let mut h = FNV64_OFFSET;
        h = fold_u32(h, delta.delta_id);
        h = fold_u32(h, delta.process_count);
        h = fold_u32(h, delta.rng_stream_count);
        agg = agg.wrapping_add(h);
    }
    agg
}

#[allow(clippy::too_many_arguments)]
pub fn run_resolve(
    fixture: &Fixture,
    region_name: &str,
    tick: u64,
    tick_delta: u64,
    budget_max: u32,
    inactive_count: u32,
) -> i32 {
    let mut domain = build_domain(fixture);
    let region_id = fixture.region_id(region_name);
    let mut budget = Budget::new(budget_max);

    // Throwaway `Declared`-state sibling domains, built and freed around
    // the resolve call as interference side-noise: they never touch
    // `domain` or `budget`, so their presence must not change the result.
    let mut siblings: Vec<_> = (0..inactive_count)
        .map(|_| {
            let mut sibling = build_domain(fixture);
            domain_set_state(&mut sibling, ExistenceState::Declared, ArchivalState::Live);
            sibling
        })
        .collect();

    let result = resolve(&mut domain, region_id, tick, tick_delta, &mut budget);
    let digest = resolve_hash(&domain);

    for sibling in &mut siblings {
        domain_free(sibling);
    }

    println!("{RESOLVE_HEADER}");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("region_id={}", region_id);
    println!("zone_count={}", result.zone_count);
    println!("assignment_count={}", result.assignment_count);
    println!("policy_count={}", result.policy_count);
    println!("log_count={}", result.log_count);
    println!("hash_link_count={}", result.hash_link_count);
    println!("delta_count={}", result.delta_count);
    println!("server_mode_count={}", result.server_mode_count);
    println!("delegated_mode_count={}", result.delegated_mode_count);
    println!("dormant_mode_count={}", result.dormant_mode_count);
    println!("verification_ok_count={}", result.verification_ok_count);
    println!("verification_fail_count={}", result.verification_fail_count);
    println!("failure_rate_q16={}", result.failure_rate);
    println!("flags={}", result.flags);
    println!("ok={}", u32::from(result.ok));
    println!("refusal_reason={}", result.refusal_reason.to_u32());
    println!("budget.used={}", result.budget_used);
    println!("budget.max={}", result.budget_max);
    println!("resolve_hash={digest}");

    domain_free(&mut domain);
    i32::from(!result.ok)
}

pub fn run_collapse(fixture: &Fixture, region_name: &str) -> i32 {
    let mut domain = build_domain(fixture);
    let region_id = fixture.region_id(region_name);
    let before = capsule_count(&domain);
    let _ = collapse_region(&mut domain, region_id);
    let after = capsule_count(&domain);

    println!("{COLLAPSE_HEADER}");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("region_id={region_id}");
    println!("capsule_count_before={before}");
    println!("capsule_count_after={after}");

    domain_free(&mut domain);
    0
}

/// Not present in the original companion tool: the collapse/expand
/// round trip (the spec's invariant that expand exactly reverses
/// collapse) has no command-line way to exercise outside the kernel's
/// own tests, so this mirrors `run_collapse`'s shape for the inverse
/// operation.
pub fn run_expand(fixture: &Fixture, region_name: &str) -> i32 {
    let mut domain = build_domain(fixture);
    let region_id = fixture.region_id(region_name);
    let before = capsule_count(&domain);
    let ok = expand_region(&mut domain, region_id).is_ok();
    let after = capsule_count(&domain);

    println!("{EXPAND_HEADER}");
    println!("fixture_id={}", fixture.fixture_id);
    println!("provider_chain={PROVIDER_CHAIN}");
    println!("region_id={region_id}");
    println!("capsule_count_before={before}");
    println!("capsule_count_after={after}");
    println!("ok={}", u32::from(ok));

    domain_free(&mut domain);
    i32::from(!ok)
}
