//! A region is either present in the capsule list or not; duplicate
//! capsules for the same `region_id` are forbidden. Collapse is
//! idempotent, expand is not.

use srz_kernel::capsule::{capsule_at, capsule_count, collapse_region, expand_region, CapsuleFailure};
use srz_kernel::domain::domain_init;
use srz_kernel::entity::Zone;
use srz_kernel::surface::SurfaceDescription;

fn domain_with_region(region_id: u32) -> srz_kernel::domain::Domain {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        region_id,
        ..Zone::default()
    });
    domain_init(surface)
}

#[test]
fn repeated_collapse_never_produces_a_second_capsule() {
    let mut domain = domain_with_region(5);
    for _ in 0..5 {
        collapse_region(&mut domain, 5).unwrap();
    }
    assert_eq!(capsule_count(&domain), 1);
    assert_eq!(capsule_at(&domain, 0).unwrap().region_id, 5);
}

#[test]
fn distinct_regions_collapse_into_distinct_capsules() {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        region_id: 5,
        ..Zone::default()
    });
    surface.zones.push(Zone {
        srz_id: 2,
        region_id: 6,
        ..Zone::default()
    });
    let mut domain = domain_init(surface);
    collapse_region(&mut domain, 5).unwrap();
    collapse_region(&mut domain, 6).unwrap();
    assert_eq!(capsule_count(&domain), 2);
}

#[test]
fn expand_without_a_prior_collapse_is_refused_not_a_no_op() {
    let mut domain = domain_with_region(5);
    assert_eq!(expand_region(&mut domain, 5), Err(CapsuleFailure::NotCollapsed));
}

#[test]
fn wildcard_region_can_never_be_collapsed() {
    let mut domain = domain_with_region(0);
    assert_eq!(collapse_region(&mut domain, 0), Err(CapsuleFailure::WildcardRegion));
}
