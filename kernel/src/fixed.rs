//! Q16.16 fixed-point ratio math and histogram binning (C1).
//!
//! No IEEE floats appear anywhere in this module or anywhere on the
//! resolve hot path. `Ratio` is a thin newtype over the raw `i32`
//! representation used everywhere else in this crate (entity struct
//! fields carry the raw `i32` directly, matching the original `q16_16`
//! C typedef) — it exists only to make the handful of call sites that
//! *compute* a ratio from counts self-documenting, the way
//! `Code32::new` documents construction of a packed identifier.

/// `0x10000`: the Q16.16 representation of `1.0`.
pub const RATIO_ONE: i32 = 0x0001_0000;

/// Number of bins in a region's failure-rate histogram.
pub const HIST_BINS: usize = 4;

/// A Q16.16 fixed-point ratio, always in `[0, RATIO_ONE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ratio(i32);

impl Ratio {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(RATIO_ONE);

    /// Clamp an arbitrary Q16.16 value into `[0, RATIO_ONE]`.
    #[must_use]
    pub const fn clamp(v: i32) -> Self {
        if v < 0 {
            Self(0)
        } else if v > RATIO_ONE {
            Self(RATIO_ONE)
        } else {
            Self(v)
        }
    }

    /// `(num << 16) / den`, computed in `u64` to avoid overflow, or
    /// zero when `den` is zero.
    #[must_use]
    pub fn from_counts(num: u32, den: u32) -> Self {
        if den == 0 {
            Self(0)
        } else {
            Self((((num as u64) << 16) / u64::from(den)) as i32)
        }
    }

    /// The raw Q16.16 representation, as stored in entity struct fields.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// `ClampRatio(v) = max(0, min(RatioOne, v))`, operating directly on
/// the raw representation (used where a caller already holds a raw
/// `i32` and does not need the newtype, e.g. threshold comparisons).
#[must_use]
pub const fn clamp_ratio(v: i32) -> i32 {
    Ratio::clamp(v).raw()
}

/// `RatioFromCounts(num, den)`, raw form.
#[must_use]
pub fn ratio_from_counts(num: u32, den: u32) -> i32 {
    Ratio::from_counts(num, den).raw()
}

/// `HistBin(ratio) = min(HIST_BINS-1, (clamp(ratio) * (HIST_BINS-1)) >> 16)`.
#[must_use]
pub fn hist_bin(ratio: i32) -> usize {
    let clamped = i64::from(clamp_ratio(ratio));
    let scaled = (clamped * (HIST_BINS as i64 - 1)) >> 16;
    (scaled as usize).min(HIST_BINS - 1)
}

/// `HistBinRatio(count, total)`: same integer shift as `ratio_from_counts`,
/// used to translate a per-bin entity count back into a Q16.16 fraction
/// of the region total.
#[must_use]
pub fn hist_bin_ratio(count: u32, total: u32) -> i32 {
    ratio_from_counts(count, total)
}
