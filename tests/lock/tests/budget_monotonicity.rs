//! Budget usage is monotonically non-decreasing within a call chain;
//! refusal occurs iff a consume would exceed `max_units`.

use srz_kernel::budget::{budget_cost, Budget};
use srz_kernel::domain::domain_init;
use srz_kernel::entity::{Log, Mode, Zone};
use srz_kernel::query::zone_query;
use srz_kernel::resolve::resolve;
use srz_kernel::surface::SurfaceDescription;

#[test]
fn consume_never_decreases_used_units() {
    let mut budget = Budget::new(100);
    let mut last_used = budget.used();
    for cost in [3, 0, 7, 1, 5] {
        assert!(budget.consume(budget_cost(cost)));
        assert!(budget.used() >= last_used);
        last_used = budget.used();
    }
}

#[test]
fn refusal_occurs_exactly_when_consume_would_exceed_max() {
    let mut budget = Budget::new(10);
    assert!(budget.consume(10));
    let used_before = budget.used();
    assert!(!budget.consume(1));
    assert_eq!(budget.used(), used_before, "a refused consume must not touch used_units");
}

#[test]
fn exhausted_budget_refuses_every_subsequent_query_without_charging() {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        mode: Mode::Server,
        ..Zone::default()
    });
    let domain = domain_init(surface);
    let mut budget = Budget::new(0);

    let first = zone_query(&domain, 1, &mut budget);
    assert_eq!(budget.used(), 0);
    let second = zone_query(&domain, 1, &mut budget);
    assert_eq!(first.meta.refusal_reason, second.meta.refusal_reason);
}

#[test]
fn resolve_budget_starvation_stops_mid_sweep_leaving_prior_verdicts_intact() {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    surface.zones.push(Zone {
        srz_id: 1,
        mode: Mode::Server,
        ..Zone::default()
    });
    for i in 1..=4u32 {
        surface.logs.push(Log {
            log_id: i,
            srz_id: 1,
            ..Log::default()
        });
    }
    let mut domain = domain_init(surface);
    domain.policy.cost_full = 10;
    domain.policy.cost_analytic = 1;
    let mut budget = Budget::new(21);
    let result = resolve(&mut domain, 0, 0, 0, &mut budget);
    assert_eq!(result.verification_ok_count + result.verification_fail_count, 2);
    assert!(budget.used() <= budget.max());
}
