//! The SRZ data model (§3): zones, assignments, policies, logs, hash
//! links, state deltas, and macro capsules, plus the tagged enums they
//! carry.
//!
//! All identifiers are opaque `u32`/`u64` integers; this crate never
//! interprets their meaning except by equality, so — unlike
//! `Code32`, which packs three sub-fields worth preserving as a
//! distinct type — they stay plain integers here. Flag words stay
//! `u32` bitmasks, since several bits legitimately co-occur on one
//! entity.

use crate::limits::{MAX_DOMAIN_REFS, MAX_THRESHOLDS};

/// Zone operating mode. `Unset` is a structural fault if encountered
/// on a live (non-zeroed) zone, not a value to be handled gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Mode {
    Unset = 0,
    Server = 1,
    Delegated = 2,
    Dormant = 3,
}

impl Mode {
    #[must_use]
    pub const fn from_u32(v: u32) -> Self {
        match v {
            1 => Self::Server,
            2 => Self::Delegated,
            3 => Self::Dormant,
            _ => Self::Unset,
        }
    }

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }
}

/// Verification strategy a zone or policy selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum VerificationPolicy {
    Unset = 0,
    Strict = 1,
    Spot = 2,
    InvariantOnly = 3,
}

impl VerificationPolicy {
    #[must_use]
    pub const fn from_u32(v: u32) -> Self {
        match v {
            1 => Self::Strict,
            2 => Self::Spot,
            3 => Self::InvariantOnly,
            _ => Self::Unset,
        }
    }

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }
}

/// Threshold metric kind. Only `FailRate` is defined; any other value
/// is `Unset` and never matches during threshold evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Metric {
    Unset = 0,
    FailRate = 1,
}

impl Metric {
    #[must_use]
    pub const fn from_u32(v: u32) -> Self {
        match v {
            1 => Self::FailRate,
            _ => Self::Unset,
        }
    }

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }
}

/// `(metric, Q16.16 value)` pair used for escalation and de-escalation
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Threshold {
    pub metric: Metric,
    pub value: i32,
}

impl Default for Metric {
    fn default() -> Self {
        Self::Unset
    }
}

/// Domain existence state. Not present in the retrieved original
/// source pack (`dom_domain_existence_state` lives in an external
/// module); its variants and discriminants are fixed by this crate —
/// see `SPEC_FULL.md`'s Open Question resolution and `DESIGN.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ExistenceState {
    Nonexistent = 0,
    Declared = 1,
    Realized = 2,
}

/// Domain archival state. Same provenance note as [`ExistenceState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ArchivalState {
    Live = 0,
    Archived = 1,
}

/// Semantic refusal reason, reported inside every sample/result (§7).
///
/// `NoSource` from `spec.md`'s prose is not a distinct discriminant:
/// the original header's `dom_srz_refusal_reason` enum has one
/// "missing" value per entity kind, and single-entity queries each
/// emit their own kind-specific variant on a lookup miss. See
/// `DESIGN.md` for this reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum RefusalReason {
    None = 0,
    Budget = 1,
    DomainInactive = 2,
    ZoneMissing = 3,
    AssignmentMissing = 4,
    PolicyMissing = 5,
    LogMissing = 6,
    HashMissing = 7,
    DeltaMissing = 8,
    Epistemic = 9,
    ProofInvalid = 10,
    /// Reserved: policy-level rejection. Not emitted by this version.
    Policy = 11,
    /// Reserved: unreachable / bug marker. Not emitted by this version.
    Internal = 12,
}

impl Default for RefusalReason {
    fn default() -> Self {
        Self::None
    }
}

impl RefusalReason {
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }
}

/// A region of simulation authority.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub srz_id: u32,
    pub domain_count: u32,
    pub domain_ids: [u32; MAX_DOMAIN_REFS],
    pub mode: Mode,
    pub verification_policy: VerificationPolicy,
    pub escalation_count: u32,
    pub escalation: [Threshold; MAX_THRESHOLDS],
    pub deescalation_count: u32,
    pub deescalation: [Threshold; MAX_THRESHOLDS],
    pub epistemic_scope_id: u32,
    pub policy_id: u32,
    pub provenance_id: u32,
    pub region_id: u32,
    pub flags: u32,
}

impl Zone {
    pub const UNRESOLVED: u32 = 1 << 0;
    pub const COLLAPSED: u32 = 1 << 1;
    pub const ESCALATED: u32 = 1 << 2;
    pub const DEESCALATED: u32 = 1 << 3;
}

impl Default for Zone {
    fn default() -> Self {
        Self {
            srz_id: 0,
            domain_count: 0,
            domain_ids: [0; MAX_DOMAIN_REFS],
            mode: Mode::Unset,
            verification_policy: VerificationPolicy::Unset,
            escalation_count: 0,
            escalation: [Threshold::default(); MAX_THRESHOLDS],
            deescalation_count: 0,
            deescalation: [Threshold::default(); MAX_THRESHOLDS],
            epistemic_scope_id: 0,
            policy_id: 0,
            provenance_id: 0,
            region_id: 0,
            flags: 0,
        }
    }
}

/// Binds an executor and its authority token to a zone over a tick range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Assignment {
    pub assignment_id: u32,
    pub srz_id: u32,
    pub executor_id: u32,
    pub authority_token_id: u32,
    pub capability_baseline_id: u32,
    pub start_tick: u64,
    pub expiry_tick: u64,
    pub provenance_id: u32,
    pub region_id: u32,
    pub flags: u32,
}

impl Assignment {
    pub const UNRESOLVED: u32 = 1 << 0;
    pub const COLLAPSED: u32 = 1 << 1;
    pub const EXPIRED: u32 = 1 << 2;
}

/// Named verification regime overriding a zone's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub policy_id: u32,
    pub verification_policy: VerificationPolicy,
    pub spot_check_rate: i32,
    pub strict_replay_interval: u64,
    pub max_segment_ticks: u64,
    pub provenance_id: u32,
    pub region_id: u32,
    pub flags: u32,
}

impl Policy {
    pub const UNRESOLVED: u32 = 1 << 0;
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            policy_id: 0,
            verification_policy: VerificationPolicy::Unset,
            spot_check_rate: 0,
            strict_replay_interval: 0,
            max_segment_ticks: 0,
            provenance_id: 0,
            region_id: 0,
            flags: 0,
        }
    }
}

/// A recorded execution segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Log {
    pub log_id: u32,
    pub srz_id: u32,
    pub assignment_id: u32,
    pub policy_id: u32,
    pub chain_id: u32,
    pub delta_id: u32,
    pub start_tick: u64,
    pub end_tick: u64,
    pub process_count: u32,
    pub rng_stream_count: u32,
    pub epistemic_scope_id: u32,
    pub provenance_id: u32,
    pub region_id: u32,
    pub flags: u32,
}

impl Log {
    pub const UNRESOLVED: u32 = 1 << 0;
    pub const VERIFIED: u32 = 1 << 1;
    pub const FAILED: u32 = 1 << 2;
    pub const EPISTEMIC_MISMATCH: u32 = 1 << 3;
}

/// One segment in a chain of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashLink {
    pub link_id: u32,
    pub chain_id: u32,
    pub segment_index: u32,
    pub prev_hash: u64,
    pub hash: u64,
    pub start_tick: u64,
    pub end_tick: u64,
    pub process_count: u32,
    pub rng_stream_count: u32,
    pub provenance_id: u32,
    pub region_id: u32,
    pub flags: u32,
}

impl HashLink {
    pub const UNRESOLVED: u32 = 1 << 0;
    pub const BROKEN: u32 = 1 << 1;
}

/// Net state change attributable to a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateDelta {
    pub delta_id: u32,
    pub srz_id: u32,
    pub log_id: u32,
    pub process_count: u32,
    pub rng_stream_count: u32,
    pub provenance_id: u32,
    pub region_id: u32,
    pub flags: u32,
}

impl StateDelta {
    pub const UNRESOLVED: u32 = 1 << 0;
    pub const INVARIANTS_OK: u32 = 1 << 1;
    pub const INVARIANTS_FAIL: u32 = 1 << 2;
}

/// A frozen summary of a collapsed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroCapsule {
    /// Equal to `region_id` on creation.
    pub capsule_id: u64,
    pub region_id: u32,
    pub zone_count: u32,
    pub assignment_count: u32,
    pub policy_count: u32,
    pub log_count: u32,
    pub hash_link_count: u32,
    pub delta_count: u32,
    pub verification_ok_count: u32,
    pub verification_fail_count: u32,
    pub failure_hist: [i32; crate::fixed::HIST_BINS],
    /// Opaque, reserved for deterministic re-expansion. Not exercised
    /// by `resolve`; always zero-initialized on collapse. See
    /// `SPEC_FULL.md`'s Open Question.
    pub rng_cursor: [u32; crate::fixed::HIST_BINS],
}

impl Default for MacroCapsule {
    fn default() -> Self {
        Self {
            capsule_id: 0,
            region_id: 0,
            zone_count: 0,
            assignment_count: 0,
            policy_count: 0,
            log_count: 0,
            hash_link_count: 0,
            delta_count: 0,
            verification_ok_count: 0,
            verification_fail_count: 0,
            failure_hist: [0; crate::fixed::HIST_BINS],
            rng_cursor: [0; crate::fixed::HIST_BINS],
        }
    }
}
