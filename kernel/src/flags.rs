//! Bit-flag namespaces shared across sample/result types.
//!
//! The original header uses a single `dom_srz_resolve_flags` enum for
//! both `dom_srz_region_sample.flags` and
//! `dom_srz_resolve_result.flags`; this module holds that shared bit
//! namespace so [`crate::region`] and [`crate::resolve`] don't need to
//! depend on each other to agree on bit positions.
pub mod resolve {
    pub const PARTIAL: u32 = 1 << 0;
    pub const VERIFIED: u32 = 1 << 1;
    pub const VERIFICATION_FAILED: u32 = 1 << 2;
    pub const EPISTEMIC_REFUSED: u32 = 1 << 3;
    pub const ESCALATED: u32 = 1 << 4;
    pub const DEESCALATED: u32 = 1 << 5;
    pub const STRICT_APPLIED: u32 = 1 << 6;
    pub const SPOT_APPLIED: u32 = 1 << 7;
    pub const INVARIANT_ONLY_APPLIED: u32 = 1 << 8;
}
