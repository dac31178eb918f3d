//! Chain-of-evidence verification (C7): strict replay, spot check, and
//! invariants-only, plus the epistemic-scope agreement check used by
//! `resolve`.

use crate::domain::Domain;
use crate::entity::{HashLink, Log, StateDelta, Zone};

/// Outcome of a chain/delta verification attempt: whether it holds,
/// and the process/rng totals it accumulated (used by `resolve`'s
/// count-integrity downgrade).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainOutcome {
    pub ok: bool,
    pub process_total: u32,
    pub rng_total: u32,
}

impl ChainOutcome {
    const fn fail() -> Self {
        Self {
            ok: false,
            process_total: 0,
            rng_total: 0,
        }
    }
}

fn chain_link_count(domain: &Domain, chain_id: u32) -> u32 {
    domain.hash_links.iter().filter(|l| l.chain_id == chain_id).count() as u32
}

/// The unique link with `prev_hash == 0` for this chain. If more than
/// one such link exists, there is no valid root (none is returned),
/// enforcing invariant #3 ("exactly zero or one hash link per chain
/// has `prev_hash == 0`") at verify time rather than only at ingest.
fn chain_first(domain: &Domain, chain_id: u32) -> Option<&HashLink> {
    let mut found = None;
    let mut count = 0u32;
    for link in domain.hash_links.iter().filter(|l| l.chain_id == chain_id) {
        if link.prev_hash == 0 {
            count += 1;
            found = Some(link);
        }
    }
    if count == 1 {
        found
    } else {
        None
    }
}

/// Linear search for the link in `chain_id` whose `prev_hash` equals
/// `prev_hash` — this is how strict verification walks root → leaf,
/// treating the current link's `hash` as the next link's `prev_hash`.
fn chain_next(domain: &Domain, chain_id: u32, prev_hash: u64) -> Option<&HashLink> {
    domain
        .hash_links
        .iter()
        .find(|l| l.chain_id == chain_id && l.prev_hash == prev_hash)
}

/// Walk the chain from its root by `prev_hash → hash` linkage.
/// Requires every link to be visited exactly once; guards against
/// cycles by bounding steps at the chain's link cardinality plus one.
#[must_use]
pub fn verify_strict(domain: &Domain, log: &Log) -> ChainOutcome {
    if log.chain_id == 0 {
        return ChainOutcome::fail();
    }
    let total_links = chain_link_count(domain, log.chain_id);
    if total_links == 0 {
        return ChainOutcome::fail();
    }
    let Some(first) = chain_first(domain, log.chain_id) else {
        return ChainOutcome::fail();
    };

    let mut link = first;
    let mut seen = 0u32;
    let mut process_total = 0u32;
    let mut rng_total = 0u32;
    let mut guard = 0u32;

    loop {
        seen += 1;
        process_total += link.process_count;
        rng_total += link.rng_stream_count;
        if link.hash == 0 {
            return ChainOutcome::fail();
        }
        guard += 1;
        if guard > total_links + 1 {
            return ChainOutcome::fail();
        }
        match chain_next(domain, log.chain_id, link.hash) {
            Some(next) => link = next,
            None => break,
        }
    }

    ChainOutcome {
        ok: seen == total_links,
        process_total,
        rng_total,
    }
}

/// Require the root to exist and the highest-segment-index link to
/// have a nonzero hash; accumulate totals over every link of the
/// chain without walking the prev/hash linkage.
#[must_use]
pub fn verify_spot(domain: &Domain, log: &Log) -> ChainOutcome {
    if log.chain_id == 0 {
        return ChainOutcome::fail();
    }
    if chain_first(domain, log.chain_id).is_none() {
        return ChainOutcome::fail();
    }

    let mut process_total = 0u32;
    let mut rng_total = 0u32;
    let mut last: Option<&HashLink> = None;

    for link in domain.hash_links.iter().filter(|l| l.chain_id == log.chain_id) {
        process_total += link.process_count;
        rng_total += link.rng_stream_count;
        let replace = match last {
            None => true,
            Some(cur) => link.segment_index > cur.segment_index,
        };
        if replace {
            last = Some(link);
        }
    }

    match last {
        Some(link) if link.hash != 0 => ChainOutcome {
            ok: true,
            process_total,
            rng_total,
        },
        _ => ChainOutcome::fail(),
    }
}

/// Succeeds iff the log's referenced delta has its `InvariantsOk` flag
/// set and its process/rng counts exactly equal the log's. Unlike
/// strict/spot, this comparison is unconditional (not a "both nonzero"
/// guard) — the original source applies it regardless of zero counts.
/// Never reports totals, since the delta's counts are compared
/// directly rather than accumulated from a chain walk.
#[must_use]
pub fn verify_invariant_only(domain: &Domain, log: &Log) -> ChainOutcome {
    if log.delta_id == 0 {
        return ChainOutcome::fail();
    }
    let Some(delta) = domain.deltas.iter().find(|d| d.delta_id == log.delta_id) else {
        return ChainOutcome::fail();
    };
    let ok = (delta.flags & StateDelta::INVARIANTS_OK) != 0
        && delta.process_count == log.process_count
        && delta.rng_stream_count == log.rng_stream_count;
    ChainOutcome {
        ok,
        process_total: 0,
        rng_total: 0,
    }
}

/// True if either side's epistemic scope is zero (wildcard/exempt), or
/// both sides agree exactly.
#[must_use]
pub fn epistemic_ok(zone: &Zone, log: &Log) -> bool {
    zone.epistemic_scope_id == 0 || log.epistemic_scope_id == 0 || zone.epistemic_scope_id == log.epistemic_scope_id
}
