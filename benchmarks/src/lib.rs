//! Shared helpers for SRZ benchmark suites.

use srz_kernel::domain::{domain_init, Domain};
use srz_kernel::entity::{HashLink, Log, Mode, VerificationPolicy, Zone};
use srz_kernel::surface::SurfaceDescription;

/// A named domain-size/shape scenario, analogous to a search "regime":
/// a fixed recipe for building a domain so every benchmark invocation
/// times the same input.
pub struct Regime {
    pub name: &'static str,
    pub domain: Domain,
}

/// `zone_count` server-mode zones, each carrying `logs_per_zone`
/// already-verifiable logs (no chain walk needed, isolating
/// `resolve`'s bookkeeping cost from chain verification cost).
#[must_use]
pub fn server_regime(name: &'static str, zone_count: u32, logs_per_zone: u32) -> Regime {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    let mut log_id = 1u32;
    for srz_id in 1..=zone_count {
        surface.zones.push(Zone {
            srz_id,
            mode: Mode::Server,
            region_id: 1,
            ..Zone::default()
        });
        for _ in 0..logs_per_zone {
            surface.logs.push(Log {
                log_id,
                srz_id,
                region_id: 1,
                ..Log::default()
            });
            log_id += 1;
        }
    }
    Regime {
        name,
        domain: domain_init(surface),
    }
}

/// `zone_count` delegated/strict zones, each with one log backed by a
/// two-link hash chain — the most expensive `resolve` path per log.
#[must_use]
pub fn delegated_strict_regime(name: &'static str, zone_count: u32) -> Regime {
    let mut surface = SurfaceDescription::new(1, 0, 0);
    for srz_id in 1..=zone_count {
        surface.zones.push(Zone {
            srz_id,
            mode: Mode::Delegated,
            verification_policy: VerificationPolicy::Strict,
            region_id: 1,
            ..Zone::default()
        });
        let chain_id = srz_id;
        surface.logs.push(Log {
            log_id: srz_id,
            srz_id,
            region_id: 1,
            chain_id,
            process_count: 5,
            rng_stream_count: 2,
            ..Log::default()
        });
        surface.hash_links.push(HashLink {
            link_id: chain_id * 2,
            chain_id,
            segment_index: 0,
            prev_hash: 0,
            hash: 1,
            process_count: 3,
            rng_stream_count: 1,
            region_id: 1,
            ..HashLink::default()
        });
        surface.hash_links.push(HashLink {
            link_id: chain_id * 2 + 1,
            chain_id,
            segment_index: 1,
            prev_hash: 1,
            hash: 2,
            process_count: 2,
            rng_stream_count: 1,
            region_id: 1,
            ..HashLink::default()
        });
    }
    Regime {
        name,
        domain: domain_init(surface),
    }
}

#[must_use]
pub fn standard_regimes() -> Vec<Regime> {
    vec![
        server_regime("server_small", 8, 1),
        server_regime("server_large", 128, 2),
        delegated_strict_regime("delegated_strict_small", 8),
        delegated_strict_regime("delegated_strict_large", 96),
    ]
}
