//! Fixture format: a line-oriented `key=value` text format describing
//! one surface description plus human-readable names for its entities.
//!
//! Grounded on the companion CLI's original fixture reader: a header
//! line, then `#`-comments and blank lines ignored, then `key=value`
//! pairs applied one at a time. An unrecognized key, or a value that
//! fails to parse for its key, is silently skipped — a malformed line
//! never aborts the load. Only a missing or wrong header fails the
//! whole file.

use std::collections::HashMap;

use srz_kernel::entity::{Assignment, HashLink, Log, Metric, Mode, Policy, StateDelta, Threshold, VerificationPolicy, Zone};
use srz_kernel::limits::MAX_THRESHOLDS;
use srz_kernel::surface::DomainPolicy;

use crate::hash::fnv32;

pub const FIXTURE_HEADER: &str = "DOMINIUM_SRZ_FIXTURE_V1";
pub const PROVIDER_CHAIN: &str = "zones->assignments->policies->logs->hashchain->deltas";
pub const MAX_REGIONS: usize = srz_kernel::limits::MAX_REGIONS;

/// A loaded fixture: a surface description plus the name registries
/// needed to translate fixture-authored names to the opaque ids the
/// kernel operates on.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub fixture_id: String,
    pub domain_id: u64,
    pub world_seed: u64,
    pub meters_per_unit: i32,

    pub zones: Vec<Zone>,
    pub zone_count: u32,
    pub zone_names: HashMap<u32, String>,

    pub assignments: Vec<Assignment>,
    pub assignment_count: u32,
    pub assignment_names: HashMap<u32, String>,

    pub policies: Vec<Policy>,
    pub policy_count: u32,
    pub policy_names: HashMap<u32, String>,

    pub logs: Vec<Log>,
    pub log_count: u32,
    pub log_names: HashMap<u32, String>,

    pub hash_links: Vec<HashLink>,
    pub hash_link_count: u32,

    pub deltas: Vec<StateDelta>,
    pub delta_count: u32,

    pub policy_override: Option<DomainPolicy>,

    /// Name -> id, first-seen order, capped at [`MAX_REGIONS`].
    pub regions: Vec<(String, u32)>,
}

fn ensure_len<T: Default + Clone>(v: &mut Vec<T>, len: usize) {
    if v.len() < len {
        v.resize(len, T::default());
    }
}

fn parse_u32(text: &str) -> Option<u32> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}

fn parse_u64(text: &str) -> Option<u64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}

/// `(value * 65536.0).round()`, matching the host engine's double-to-Q16.16 cast.
fn parse_q16(text: &str) -> Option<i32> {
    let value: f64 = text.parse().ok()?;
    Some((value * 65536.0).round() as i32)
}

fn mode_from_text(text: &str) -> Mode {
    match text {
        "server" => Mode::Server,
        "delegated" => Mode::Delegated,
        "dormant" => Mode::Dormant,
        _ => Mode::Unset,
    }
}

fn verification_policy_from_text(text: &str) -> VerificationPolicy {
    match text {
        "strict" => VerificationPolicy::Strict,
        "spot" => VerificationPolicy::Spot,
        "invariant" => VerificationPolicy::InvariantOnly,
        _ => VerificationPolicy::Unset,
    }
}

fn metric_from_text(text: &str) -> Metric {
    match text {
        "fail_rate" => Metric::FailRate,
        _ => Metric::Unset,
    }
}

/// Split `zone_3_mode` into `(3, "mode")` given prefix `"zone_"`.
fn parse_indexed_key<'a>(key: &'a str, prefix: &str) -> Option<(u32, &'a str)> {
    let rest = key.strip_prefix(prefix)?;
    let underscore = rest.find('_')?;
    let index: u32 = rest[..underscore].parse().ok()?;
    Some((index, &rest[underscore + 1..]))
}

impl Fixture {
    fn register_region(&mut self, name: &str, id: u32) {
        if name.is_empty() || id == 0 {
            return;
        }
        if self.regions.iter().any(|(_, rid)| *rid == id) {
            return;
        }
        if self.regions.len() >= MAX_REGIONS {
            return;
        }
        self.regions.push((name.to_string(), id));
    }

    fn region_id_for(&self, name: &str) -> u32 {
        self.regions.iter().find(|(n, _)| n == name).map_or_else(|| fnv32(name), |(_, id)| *id)
    }

    fn apply_zone(&mut self, index: u32, suffix: &str, value: &str) {
        let idx = index as usize;
        ensure_len(&mut self.zones, idx + 1);
        if self.zone_count <= index {
            self.zone_count = index + 1;
        }
        let region_id = match suffix {
            "id" => {
                let id = fnv32(value);
                self.zones[idx].srz_id = id;
                self.zone_names.insert(id, value.to_string());
                return;
            }
            "mode" => {
                self.zones[idx].mode = mode_from_text(value);
                return;
            }
            "verification" => {
                self.zones[idx].verification_policy = verification_policy_from_text(value);
                return;
            }
            "policy" => {
                self.zones[idx].policy_id = fnv32(value);
                return;
            }
            "domain_count" => {
                if let Some(n) = parse_u32(value) {
                    self.zones[idx].domain_count = n;
                }
                return;
            }
            "escalate_count" => {
                if let Some(n) = parse_u32(value) {
                    self.zones[idx].escalation_count = n;
                }
                return;
            }
            "deescalate_count" => {
                if let Some(n) = parse_u32(value) {
                    self.zones[idx].deescalation_count = n;
                }
                return;
            }
            "epistemic" => {
                self.zones[idx].epistemic_scope_id = fnv32(value);
                return;
            }
            "provenance" => {
                self.zones[idx].provenance_id = fnv32(value);
                return;
            }
            "region" => fnv32(value),
            _ => {
                if let Some((sub, field)) = parse_indexed_key(suffix, "domain_") {
                    if field.is_empty() && (sub as usize) < self.zones[idx].domain_ids.len() {
                        self.zones[idx].domain_ids[sub as usize] = fnv32(value);
                    }
                } else if let Some((t, field)) = parse_indexed_key(suffix, "escalate_") {
                    apply_threshold(&mut self.zones[idx].escalation, t, field, value);
                } else if let Some((t, field)) = parse_indexed_key(suffix, "deescalate_") {
                    apply_threshold(&mut self.zones[idx].deescalation, t, field, value);
                }
                return;
            }
        };
        self.zones[idx].region_id = region_id;
        self.register_region(value, region_id);
    }

    fn apply_assignment(&mut self, index: u32, suffix: &str, value: &str) {
        let idx = index as usize;
        ensure_len(&mut self.assignments, idx + 1);
        if self.assignment_count <= index {
            self.assignment_count = index + 1;
        }
        match suffix {
            "id" => {
                let id = fnv32(value);
                self.assignments[idx].assignment_id = id;
                self.assignment_names.insert(id, value.to_string());
            }
            "srz" => self.assignments[idx].srz_id = fnv32(value),
            "executor" => self.assignments[idx].executor_id = fnv32(value),
            "token" => self.assignments[idx].authority_token_id = fnv32(value),
            "capability" => self.assignments[idx].capability_baseline_id = fnv32(value),
            "start" => {
                if let Some(n) = parse_u64(value) {
                    self.assignments[idx].start_tick = n;
                }
            }
            "expiry" => {
                if let Some(n) = parse_u64(value) {
                    self.assignments[idx].expiry_tick = n;
                }
            }
            "provenance" => self.assignments[idx].provenance_id = fnv32(value),
            "region" => {
                let id = fnv32(value);
                self.assignments[idx].region_id = id;
                self.register_region(value, id);
            }
            _ => {}
        }
    }

    fn apply_policy(&mut self, index: u32, suffix: &str, value: &str) {
        let idx = index as usize;
        ensure_len(&mut self.policies, idx + 1);
        if self.policy_count <= index {
            self.policy_count = index + 1;
        }
        match suffix {
            "id" => {
                let id = fnv32(value);
                self.policies[idx].policy_id = id;
                self.policy_names.insert(id, value.to_string());
            }
            "verification" => self.policies[idx].verification_policy = verification_policy_from_text(value),
            "spot_rate" => {
                if let Some(q) = parse_q16(value) {
                    self.policies[idx].spot_check_rate = q;
                }
            }
            "strict_interval" => {
                if let Some(n) = parse_u64(value) {
                    self.policies[idx].strict_replay_interval = n;
                }
            }
            "max_segment" => {
                if let Some(n) = parse_u64(value) {
                    self.policies[idx].max_segment_ticks = n;
                }
            }
            "provenance" => self.policies[idx].provenance_id = fnv32(value),
            "region" => {
                let id = fnv32(value);
                self.policies[idx].region_id = id;
                self.register_region(value, id);
            }
            _ => {}
        }
    }

    fn apply_log(&mut self, index: u32, suffix: &str, value: &str) {
        let idx = index as usize;
        ensure_len(&mut self.logs, idx + 1);
        if self.log_count <= index {
            self.log_count = index + 1;
        }
        match suffix {
            "id" => {
                let id = fnv32(value);
                self.logs[idx].log_id = id;
                self.log_names.insert(id, value.to_string());
            }
            "srz" => self.logs[idx].srz_id = fnv32(value),
            "assignment" => self.logs[idx].assignment_id = fnv32(value),
            "policy" => self.logs[idx].policy_id = fnv32(value),
            "chain" => self.logs[idx].chain_id = fnv32(value),
            "delta" => self.logs[idx].delta_id = fnv32(value),
            "start" => {
                if let Some(n) = parse_u64(value) {
                    self.logs[idx].start_tick = n;
                }
            }
            "end" => {
                if let Some(n) = parse_u64(value) {
                    self.logs[idx].end_tick = n;
                }
            }
            "process_count" => {
                if let Some(n) = parse_u32(value) {
                    self.logs[idx].process_count = n;
                }
            }
            "rng_count" => {
                if let Some(n) = parse_u32(value) {
                    self.logs[idx].rng_stream_count = n;
                }
            }
            "epistemic" => self.logs[idx].epistemic_scope_id = fnv32(value),
            "provenance" => self.logs[idx].provenance_id = fnv32(value),
            "region" => {
                let id = fnv32(value);
                self.logs[idx].region_id = id;
                self.register_region(value, id);
            }
            _ => {}
        }
    }

    fn apply_hash(&mut self, index: u32, suffix: &str, value: &str) {
        let idx = index as usize;
        ensure_len(&mut self.hash_links, idx + 1);
        if self.hash_link_count <= index {
            self.hash_link_count = index + 1;
        }
        match suffix {
            "id" => self.hash_links[idx].link_id = fnv32(value),
            "chain" => self.hash_links[idx].chain_id = fnv32(value),
            "index" => {
                if let Some(n) = parse_u32(value) {
                    self.hash_links[idx].segment_index = n;
                }
            }
            "prev" => {
                if let Some(n) = parse_u64(value) {
                    self.hash_links[idx].prev_hash = n;
                }
            }
            "hash" => {
                if let Some(n) = parse_u64(value) {
                    self.hash_links[idx].hash = n;
                }
            }
            "start" => {
                if let Some(n) = parse_u64(value) {
                    self.hash_links[idx].start_tick = n;
                }
            }
            "end" => {
                if let Some(n) = parse_u64(value) {
                    self.hash_links[idx].end_tick = n;
                }
            }
            "process_count" => {
                if let Some(n) = parse_u32(value) {
                    self.hash_links[idx].process_count = n;
                }
            }
            "rng_count" => {
                if let Some(n) = parse_u32(value) {
                    self.hash_links[idx].rng_stream_count = n;
                }
            }
            "provenance" => self.hash_links[idx].provenance_id = fnv32(value),
            "region" => {
                let id = fnv32(value);
                self.hash_links[idx].region_id = id;
                self.register_region(value, id);
            }
            _ => {}
        }
    }

    fn apply_delta(&mut self, index: u32, suffix: &str, value: &str) {
        let idx = index as usize;
        ensure_len(&mut self.deltas, idx + 1);
        if self.delta_count <= index {
            self.delta_count = index + 1;
        }
        match suffix {
            "id" => self.deltas[idx].delta_id = fnv32(value),
            "srz" => self.deltas[idx].srz_id = fnv32(value),
            "log" => self.deltas[idx].log_id = fnv32(value),
            "process_count" => {
                if let Some(n) = parse_u32(value) {
                    self.deltas[idx].process_count = n;
                }
            }
            "rng_count" => {
                if let Some(n) = parse_u32(value) {
                    self.deltas[idx].rng_stream_count = n;
                }
            }
            "invariants_ok" => {
                if let Some(flag) = parse_u32(value) {
                    if flag != 0 {
                        self.deltas[idx].flags |= StateDelta::INVARIANTS_OK;
                    } else {
                        self.deltas[idx].flags |= StateDelta::INVARIANTS_FAIL;
                    }
                }
            }
            "provenance" => self.deltas[idx].provenance_id = fnv32(value),
            "region" => {
                let id = fnv32(value);
                self.deltas[idx].region_id = id;
                self.register_region(value, id);
            }
            _ => {}
        }
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "fixture_id" => {
                self.fixture_id = value.to_string();
                return;
            }
            "world_seed" => {
                if let Some(n) = parse_u64(value) {
                    self.world_seed = n;
                }
                return;
            }
            "domain_id" => {
                if let Some(n) = parse_u64(value) {
                    self.domain_id = n;
                }
                return;
            }
            "meters_per_unit" => {
                if let Some(q) = parse_q16(value) {
                    self.meters_per_unit = q;
                }
                return;
            }
            "zone_count" => {
                if let Some(n) = parse_u32(value) {
                    self.zone_count = n;
                }
                return;
            }
            "assignment_count" => {
                if let Some(n) = parse_u32(value) {
                    self.assignment_count = n;
                }
                return;
            }
            "policy_count" => {
                if let Some(n) = parse_u32(value) {
                    self.policy_count = n;
                }
                return;
            }
            "log_count" => {
                if let Some(n) = parse_u32(value) {
                    self.log_count = n;
                }
                return;
            }
            "hash_link_count" => {
                if let Some(n) = parse_u32(value) {
                    self.hash_link_count = n;
                }
                return;
            }
            "delta_count" => {
                if let Some(n) = parse_u32(value) {
                    self.delta_count = n;
                }
                return;
            }
            _ => {}
        }
        if let Some(n) = parse_u32(value) {
            match key {
                "cost_full" => {
                    self.policy_override.get_or_insert_with(DomainPolicy::default).cost_full = n;
                    return;
                }
                "cost_medium" => {
                    self.policy_override.get_or_insert_with(DomainPolicy::default).cost_medium = n;
                    return;
                }
                "cost_coarse" => {
                    self.policy_override.get_or_insert_with(DomainPolicy::default).cost_coarse = n;
                    return;
                }
                "cost_analytic" => {
                    self.policy_override.get_or_insert_with(DomainPolicy::default).cost_analytic = n;
                    return;
                }
                _ => {}
            }
        }

        if let Some((index, suffix)) = parse_indexed_key(key, "zone_") {
            self.apply_zone(index, suffix, value);
        } else if let Some((index, suffix)) = parse_indexed_key(key, "assignment_") {
            self.apply_assignment(index, suffix, value);
        } else if let Some((index, suffix)) = parse_indexed_key(key, "policy_") {
            self.apply_policy(index, suffix, value);
        } else if let Some((index, suffix)) = parse_indexed_key(key, "log_") {
            self.apply_log(index, suffix, value);
        } else if let Some((index, suffix)) = parse_indexed_key(key, "hash_") {
            self.apply_hash(index, suffix, value);
        } else if let Some((index, suffix)) = parse_indexed_key(key, "delta_") {
            self.apply_delta(index, suffix, value);
        }
    }

    /// Load a fixture from its text form. Fails only on a missing or
    /// mismatched header line; every `key=value` line is best-effort.
    pub fn parse(text: &str) -> Option<Self> {
        let mut fixture = Self {
            fixture_id: "srz.fixture.unknown".to_string(),
            ..Self::default()
        };
        let mut header_ok = false;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if !header_ok {
                if line != FIXTURE_HEADER {
                    return None;
                }
                header_ok = true;
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            fixture.apply(key.trim(), value.trim());
        }
        if !header_ok {
            return None;
        }
        Some(fixture)
    }

    pub fn region_id(&self, name: &str) -> u32 {
        self.region_id_for(name)
    }

    #[must_use]
    pub fn surface(&self) -> srz_kernel::surface::SurfaceDescription {
        let mut surface = srz_kernel::surface::SurfaceDescription::new(self.domain_id, self.world_seed, self.meters_per_unit);
        surface.zones = self.zones.iter().take(self.zone_count as usize).cloned().collect();
        surface.assignments = self.assignments.iter().take(self.assignment_count as usize).copied().collect();
        surface.policies = self.policies.iter().take(self.policy_count as usize).copied().collect();
        surface.logs = self.logs.iter().take(self.log_count as usize).copied().collect();
        surface.hash_links = self.hash_links.iter().take(self.hash_link_count as usize).copied().collect();
        surface.deltas = self.deltas.iter().take(self.delta_count as usize).copied().collect();
        surface
    }
}

fn apply_threshold(table: &mut [Threshold; MAX_THRESHOLDS], index: u32, field: &str, value: &str) {
    let Some(slot) = table.get_mut(index as usize) else {
        return;
    };
    match field {
        "metric" => slot.metric = metric_from_text(value),
        "value" => {
            if let Some(q) = parse_q16(value) {
                slot.value = q;
            }
        }
        _ => {}
    }
}
