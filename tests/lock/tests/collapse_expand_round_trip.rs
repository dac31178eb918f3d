//! Collapse folds a region's entities into a macro capsule; expand
//! removes it. The region aggregator and resolve engine must answer
//! identically for a live region and for that same region immediately
//! after an expand undoes its collapse.

use srz_kernel::budget::Budget;
use srz_kernel::capsule::{collapse_region, expand_region};
use srz_kernel::domain::domain_init;
use srz_kernel::entity::{Log, Mode, Zone};
use srz_kernel::region::region_query;
use srz_kernel::resolve::resolve;
use srz_kernel::surface::SurfaceDescription;

fn domain_with_logged_zone() -> srz_kernel::domain::Domain {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        region_id: 5,
        mode: Mode::Server,
        ..Zone::default()
    });
    surface.logs.push(Log {
        log_id: 1,
        srz_id: 1,
        region_id: 5,
        ..Log::default()
    });
    domain_init(surface)
}

#[test]
fn region_query_matches_before_collapse_and_after_expand() {
    let mut domain = domain_with_logged_zone();
    let mut budget = Budget::new(1000);
    let before = region_query(&domain, 5, &mut budget);

    collapse_region(&mut domain, 5).unwrap();
    expand_region(&mut domain, 5).unwrap();

    let mut budget = Budget::new(1000);
    let after = region_query(&domain, 5, &mut budget);

    assert_eq!(before.zone_count, after.zone_count);
    assert_eq!(before.log_count, after.log_count);
    assert_eq!(before.flags, after.flags);
}

#[test]
fn resolve_runs_the_full_verification_sweep_again_after_expand() {
    let mut domain = domain_with_logged_zone();
    let mut budget = Budget::new(1000);
    let first = resolve(&mut domain, 5, 0, 0, &mut budget);
    assert!(first.ok);
    assert_eq!(first.flags & srz_kernel::flags::resolve::PARTIAL, 0);

    collapse_region(&mut domain, 5).unwrap();
    let mut budget = Budget::new(1000);
    let collapsed = resolve(&mut domain, 5, 0, 0, &mut budget);
    assert_ne!(collapsed.flags & srz_kernel::flags::resolve::PARTIAL, 0, "a collapsed region reports only capsule summary");

    expand_region(&mut domain, 5).unwrap();
    let mut budget = Budget::new(1000);
    let expanded = resolve(&mut domain, 5, 0, 0, &mut budget);
    assert_eq!(expanded.flags & srz_kernel::flags::resolve::PARTIAL, 0, "expand must restore the full sweep");
    assert_eq!(expanded.verification_ok_count, first.verification_ok_count);
}
