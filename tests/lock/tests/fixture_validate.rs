//! End-to-end: a fixture text blob parses, builds a domain, and the
//! structural validator and resolve engine agree on it.

use srz_cli::commands::{run_resolve, validate_fixture};
use srz_cli::fixture::Fixture;

const VALID_FIXTURE: &str = "\
DOMINIUM_SRZ_FIXTURE_V1
fixture_id=srz.fixture.smoke
zone_0_id=alpha
zone_0_mode=server
zone_0_verification=strict
zone_0_region=north
assignment_0_id=a1
assignment_0_srz=alpha
assignment_0_start=0
assignment_0_expiry=100
log_0_id=l1
log_0_srz=alpha
log_0_region=north
";

#[test]
fn a_well_formed_fixture_validates_and_resolves_cleanly() {
    let fixture = Fixture::parse(VALID_FIXTURE).expect("fixture parses");
    assert!(validate_fixture(&fixture));
    assert_eq!(run_resolve(&fixture, "north", 0, 0, 1000, 0), 0);
}

#[test]
fn an_assignment_outliving_its_own_expiry_fails_validation() {
    let text = VALID_FIXTURE.replace("assignment_0_start=0", "assignment_0_start=200");
    let fixture = Fixture::parse(&text).expect("fixture parses");
    assert!(!validate_fixture(&fixture));
}

#[test]
fn comment_lines_and_unknown_keys_do_not_block_loading() {
    let text = format!("{VALID_FIXTURE}# a trailing comment\nnot_a_real_key=1\n");
    let fixture = Fixture::parse(&text).expect("fixture still parses");
    assert!(validate_fixture(&fixture));
}

#[test]
fn inactive_sibling_domains_never_change_the_resolve_exit_code() {
    let fixture = Fixture::parse(VALID_FIXTURE).expect("fixture parses");
    let baseline = run_resolve(&fixture, "north", 0, 0, 1000, 0);
    assert_eq!(baseline, run_resolve(&fixture, "north", 0, 0, 1000, 5));
}
