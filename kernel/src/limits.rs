//! Compile-time slab capacities.
//!
//! Every entity table is a bounded `Vec` clamped to these maxima at
//! `domain_init` time. Ported from `dom_srz_*` capacity constants in
//! the original engine's `srz_fields.h`.

pub const MAX_ZONES: usize = 128;
pub const MAX_ASSIGNMENTS: usize = 128;
pub const MAX_POLICIES: usize = 64;
pub const MAX_LOGS: usize = 256;
pub const MAX_HASH_LINKS: usize = 512;
pub const MAX_DELTAS: usize = 128;
pub const MAX_DOMAIN_REFS: usize = 8;
pub const MAX_THRESHOLDS: usize = 8;
pub const MAX_REGIONS: usize = 16;
pub const MAX_CAPSULES: usize = 64;
