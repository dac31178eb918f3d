//! Repeated `resolve` sweeps over an identical domain snapshot must be
//! bit-for-bit identical (spec invariant: every operation is
//! reproducible given the same input).

use srz_kernel::budget::Budget;
use srz_kernel::domain::domain_init;
use srz_kernel::entity::{Mode, VerificationPolicy, Zone};
use srz_kernel::resolve::resolve;
use srz_kernel::surface::SurfaceDescription;

fn strict_surface() -> SurfaceDescription {
    let mut surface = SurfaceDescription::new(1, 42, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        mode: Mode::Delegated,
        verification_policy: VerificationPolicy::Strict,
        ..Zone::default()
    });
    surface.logs.push(srz_kernel::entity::Log {
        log_id: 1,
        srz_id: 1,
        chain_id: 9,
        process_count: 5,
        rng_stream_count: 2,
        ..srz_kernel::entity::Log::default()
    });
    surface.hash_links.push(srz_kernel::entity::HashLink {
        link_id: 1,
        chain_id: 9,
        prev_hash: 0,
        hash: 0x1,
        process_count: 3,
        rng_stream_count: 1,
        ..srz_kernel::entity::HashLink::default()
    });
    surface.hash_links.push(srz_kernel::entity::HashLink {
        link_id: 2,
        chain_id: 9,
        segment_index: 1,
        prev_hash: 0x1,
        hash: 0x2,
        process_count: 2,
        rng_stream_count: 1,
        ..srz_kernel::entity::HashLink::default()
    });
    surface
}

#[test]
fn repeated_resolve_over_identical_domains_is_bit_identical() {
    let mut results = Vec::new();
    for _ in 0..10 {
        let mut domain = domain_init(strict_surface());
        let mut budget = Budget::new(1000);
        results.push(resolve(&mut domain, 0, 0, 0, &mut budget));
    }
    let first = results[0];
    for (i, result) in results.iter().enumerate().skip(1) {
        assert_eq!(*result, first, "run {i} diverged from run 0");
    }
}

#[test]
fn reordered_zone_and_log_insertion_does_not_change_the_verdict() {
    let mut forward = strict_surface();
    let mut reversed = SurfaceDescription::new(1, 42, 0);
    reversed.hash_links = forward.hash_links.drain(..).rev().collect();
    reversed.logs = forward.logs.drain(..).collect();
    reversed.zones = forward.zones.drain(..).collect();

    let mut domain_a = domain_init(strict_surface());
    let mut domain_b = domain_init(reversed);
    let mut budget_a = Budget::new(1000);
    let mut budget_b = Budget::new(1000);
    let result_a = resolve(&mut domain_a, 0, 0, 0, &mut budget_a);
    let result_b = resolve(&mut domain_b, 0, 0, 0, &mut budget_b);

    assert_eq!(result_a.ok, result_b.ok);
    assert_eq!(result_a.verification_ok_count, result_b.verification_ok_count);
    assert_eq!(result_a.failure_rate, result_b.failure_rate);
}
