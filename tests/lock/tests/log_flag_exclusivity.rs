//! Resolving a log clears `Verified`/`Failed`/`EpistemicMismatch`
//! before writing a new verdict; at most one of `Verified`/`Failed` is
//! set afterward.

use srz_kernel::budget::Budget;
use srz_kernel::domain::domain_init;
use srz_kernel::entity::{Log, Mode, VerificationPolicy, Zone};
use srz_kernel::resolve::resolve;
use srz_kernel::surface::SurfaceDescription;

fn at_most_one_verdict_flag(flags: u32) -> bool {
    let verified = flags & Log::VERIFIED != 0;
    let failed = flags & Log::FAILED != 0;
    !(verified && failed)
}

#[test]
fn server_zone_logs_end_verified_never_failed() {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        mode: Mode::Server,
        ..Zone::default()
    });
    surface.logs.push(Log {
        log_id: 1,
        srz_id: 1,
        flags: Log::FAILED | Log::EPISTEMIC_MISMATCH,
        ..Log::default()
    });
    let mut domain = domain_init(surface);
    let mut budget = Budget::new(1000);
    resolve(&mut domain, 0, 0, 0, &mut budget);

    let flags = domain.logs[0].flags;
    assert!(at_most_one_verdict_flag(flags));
    assert_ne!(flags & Log::VERIFIED, 0);
    assert_eq!(flags & Log::EPISTEMIC_MISMATCH, 0, "stale epistemic flag must be cleared");
}

#[test]
fn unverifiable_delegated_log_ends_failed_never_verified() {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        mode: Mode::Delegated,
        verification_policy: VerificationPolicy::Strict,
        ..Zone::default()
    });
    surface.logs.push(Log {
        log_id: 1,
        srz_id: 1,
        chain_id: 0,
        flags: Log::VERIFIED,
        ..Log::default()
    });
    let mut domain = domain_init(surface);
    let mut budget = Budget::new(1000);
    resolve(&mut domain, 0, 0, 0, &mut budget);

    let flags = domain.logs[0].flags;
    assert!(at_most_one_verdict_flag(flags));
    assert_ne!(flags & Log::FAILED, 0);
    assert_eq!(flags & Log::VERIFIED, 0, "stale verified flag must be cleared");
}
