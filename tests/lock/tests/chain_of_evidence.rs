//! Chain-of-evidence invariants spanning logs, hash links, and state
//! deltas: a traversable root-to-leaf sequence under strict
//! verification, exactly zero or one root per chain, and epistemic
//! scope agreement gating verification entirely.

use srz_kernel::budget::Budget;
use srz_kernel::domain::domain_init;
use srz_kernel::entity::{HashLink, Log, Mode, VerificationPolicy, Zone};
use srz_kernel::resolve::resolve;
use srz_kernel::surface::SurfaceDescription;

fn delegated_strict_zone(epistemic_scope_id: u32) -> Zone {
    Zone {
        srz_id: 1,
        mode: Mode::Delegated,
        verification_policy: VerificationPolicy::Strict,
        epistemic_scope_id,
        ..Zone::default()
    }
}

#[test]
fn chain_with_two_roots_never_verifies_even_with_matching_counts() {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(delegated_strict_zone(0));
    surface.logs.push(Log {
        log_id: 1,
        srz_id: 1,
        chain_id: 9,
        ..Log::default()
    });
    surface.hash_links.push(HashLink {
        link_id: 1,
        chain_id: 9,
        prev_hash: 0,
        hash: 0x1,
        ..HashLink::default()
    });
    surface.hash_links.push(HashLink {
        link_id: 2,
        chain_id: 9,
        prev_hash: 0,
        hash: 0x2,
        ..HashLink::default()
    });
    let mut domain = domain_init(surface);
    let mut budget = Budget::new(1000);
    let result = resolve(&mut domain, 0, 0, 0, &mut budget);
    assert!(!result.ok);
    assert_ne!(domain.logs[0].flags & Log::FAILED, 0);
}

#[test]
fn epistemic_scope_disagreement_blocks_verification_before_chain_walk() {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(delegated_strict_zone(7));
    surface.logs.push(Log {
        log_id: 1,
        srz_id: 1,
        epistemic_scope_id: 9,
        chain_id: 9,
        ..Log::default()
    });
    surface.hash_links.push(HashLink {
        link_id: 1,
        chain_id: 9,
        prev_hash: 0,
        hash: 0x1,
        ..HashLink::default()
    });
    let mut domain = domain_init(surface);
    let mut budget = Budget::new(1000);
    let result = resolve(&mut domain, 0, 0, 0, &mut budget);
    assert!(!result.ok);
    assert_ne!(domain.logs[0].flags & Log::EPISTEMIC_MISMATCH, 0);
    assert_eq!(result.refusal_reason, srz_kernel::entity::RefusalReason::Epistemic);
}

#[test]
fn epistemic_scope_zero_on_either_side_exempts_the_check() {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(delegated_strict_zone(0));
    surface.logs.push(Log {
        log_id: 1,
        srz_id: 1,
        epistemic_scope_id: 42,
        chain_id: 9,
        ..Log::default()
    });
    surface.hash_links.push(HashLink {
        link_id: 1,
        chain_id: 9,
        prev_hash: 0,
        hash: 0x1,
        ..HashLink::default()
    });
    let mut domain = domain_init(surface);
    let mut budget = Budget::new(1000);
    let result = resolve(&mut domain, 0, 0, 0, &mut budget);
    assert_eq!(domain.logs[0].flags & Log::EPISTEMIC_MISMATCH, 0);
}
