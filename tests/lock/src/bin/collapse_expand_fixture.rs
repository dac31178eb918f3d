//! Runs a collapse followed by an expand over a fixed region and
//! prints capsule counts at each step, for cross-process diffing.

use srz_cli::fixture::Fixture;
use srz_kernel::capsule::{capsule_count, collapse_region, expand_region};
use srz_kernel::domain::domain_init;

const FIXTURE: &str = "\
DOMINIUM_SRZ_FIXTURE_V1
zone_0_id=alpha
zone_0_mode=server
zone_0_verification=strict
zone_0_region=north
log_0_id=l1
log_0_srz=alpha
log_0_region=north
";

fn main() {
    let fixture = Fixture::parse(FIXTURE).expect("well-formed fixture");
    let mut domain = domain_init(fixture.surface());
    let region_id = fixture.region_id("north");

    println!("capsule_count_initial={}", capsule_count(&domain));
    collapse_region(&mut domain, region_id).expect("first collapse succeeds");
    println!("capsule_count_after_collapse={}", capsule_count(&domain));
    collapse_region(&mut domain, region_id).expect("collapse is idempotent");
    println!("capsule_count_after_second_collapse={}", capsule_count(&domain));
    expand_region(&mut domain, region_id).expect("expand reverses collapse");
    println!("capsule_count_after_expand={}", capsule_count(&domain));
}
