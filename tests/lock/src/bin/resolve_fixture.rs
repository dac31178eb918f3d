//! Runs one resolve sweep over a fixed in-line fixture and prints
//! `key=value` lines, for diffing across separate process invocations.

use srz_cli::fixture::Fixture;
use srz_kernel::budget::Budget;
use srz_kernel::domain::{domain_init, domain_set_policy};
use srz_kernel::resolve::resolve;

const FIXTURE: &str = "\
DOMINIUM_SRZ_FIXTURE_V1
zone_0_id=alpha
zone_0_mode=delegated
zone_0_verification=strict
zone_0_region=north
log_0_id=l1
log_0_srz=alpha
log_0_chain=c1
log_0_process_count=5
log_0_rng_count=2
log_0_region=north
hash_0_id=h1
hash_0_chain=c1
hash_0_index=0
hash_0_prev=0
hash_0_hash=1
hash_0_process_count=3
hash_0_rng_count=1
hash_1_id=h2
hash_1_chain=c1
hash_1_index=1
hash_1_prev=1
hash_1_hash=2
hash_1_process_count=2
hash_1_rng_count=1
";

fn main() {
    let fixture = Fixture::parse(FIXTURE).expect("well-formed fixture");
    let mut domain = domain_init(fixture.surface());
    if let Some(policy) = fixture.policy_override {
        domain_set_policy(&mut domain, policy);
    }
    let region_id = fixture.region_id("north");
    let mut budget = Budget::new(1000);
    let result = resolve(&mut domain, region_id, 0, 0, &mut budget);

    println!("ok={}", u32::from(result.ok));
    println!("verification_ok_count={}", result.verification_ok_count);
    println!("verification_fail_count={}", result.verification_fail_count);
    println!("failure_rate_q16={}", result.failure_rate);
    println!("flags={}", result.flags);
    println!("budget_used={}", result.budget_used);
}
