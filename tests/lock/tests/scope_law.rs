//! `region_id == 0` is the "all regions" wildcard: never collapsible,
//! and every aggregator must treat it as matching every entity
//! regardless of that entity's own `region_id`.

use srz_kernel::budget::Budget;
use srz_kernel::domain::domain_init;
use srz_kernel::entity::{Mode, Zone};
use srz_kernel::region::region_query;
use srz_kernel::resolve::resolve;
use srz_kernel::surface::SurfaceDescription;

fn multi_region_domain() -> srz_kernel::domain::Domain {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        region_id: 5,
        mode: Mode::Server,
        ..Zone::default()
    });
    surface.zones.push(Zone {
        srz_id: 2,
        region_id: 9,
        mode: Mode::Dormant,
        ..Zone::default()
    });
    domain_init(surface)
}

#[test]
fn wildcard_region_query_counts_every_region() {
    let domain = multi_region_domain();
    let mut budget = Budget::new(1000);
    let sample = region_query(&domain, 0, &mut budget);
    assert_eq!(sample.zone_count, 2);
}

#[test]
fn named_region_query_excludes_other_regions() {
    let domain = multi_region_domain();
    let mut budget = Budget::new(1000);
    let sample = region_query(&domain, 5, &mut budget);
    assert_eq!(sample.zone_count, 1);
    assert_eq!(sample.server_mode_count, 1);
    assert_eq!(sample.dormant_mode_count, 0);
}

#[test]
fn wildcard_resolve_sweeps_every_region_in_one_call() {
    let mut domain = multi_region_domain();
    let mut budget = Budget::new(1000);
    let result = resolve(&mut domain, 0, 0, 0, &mut budget);
    assert_eq!(result.zone_count, 2);
    assert_eq!(result.server_mode_count, 1);
    assert_eq!(result.dormant_mode_count, 1);
}
