//! Pool price index scaling between display values and on-chain integers.
//!
//! Pool contracts store their price index as an integer scaled by
//! `10^4`, avoiding floating-point representation on-chain entirely. This
//! module is the one place that scale factor lives:
//!
//! - [`ScaledPriceIndex`] - The on-chain integer form
//! - [`to_display`] - Scaled integer to human-facing decimal
//! - [`to_scaled`] - Human-facing decimal to scaled integer
//! - [`PriceIndexError`] - Typed rejection of unusable values
//!
//! Truncation toward zero (never rounding) is deliberate: rounding up
//! would report a price index the pool does not actually hold.

use alloy_primitives::I256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// A pool price index in its on-chain form: the display value multiplied
/// by `10^4`.
///
/// The carrier is signed so that truncation toward zero stays
/// well-defined for negative display values; pools themselves only ever
/// hold non-negative indices. A pool that has not been primed yet has no
/// index at all, which callers represent as
/// `Option<ScaledPriceIndex>::None`, keeping "unset" and "zero"
/// distinguishable at the type level.
///
/// # Serialization
///
/// Serialized as a stringified integer to avoid loss of precision in
/// JSON, since `JavaScript`'s `Number` type cannot safely represent all
/// 256-bit integers.
///
/// ```json
/// "12345"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaledPriceIndex(I256);

impl ScaledPriceIndex {
    /// Decimal digits carried by the scaled representation.
    ///
    /// This is the only scale definition in the system; consumers needing
    /// the factor obtain it here rather than hard-coding their own.
    pub const SCALE: u32 = 4;

    /// Multiplier between display values and scaled integers.
    const SCALE_FACTOR: i64 = 10_i64.pow(Self::SCALE);

    /// A zero index (distinct from an unset one).
    pub const ZERO: Self = Self(I256::ZERO);

    /// Creates a scaled index from its raw on-chain integer.
    #[must_use]
    pub const fn new(raw: I256) -> Self {
        Self(raw)
    }

    /// Returns the raw on-chain integer.
    #[must_use]
    pub const fn inner(&self) -> I256 {
        self.0
    }
}

impl fmt::Display for ScaledPriceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScaledPriceIndex {
    type Err = <I256 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        I256::from_dec_str(s).map(Self)
    }
}

impl From<ScaledPriceIndex> for I256 {
    fn from(index: ScaledPriceIndex) -> Self {
        index.0
    }
}

impl From<I256> for ScaledPriceIndex {
    fn from(raw: I256) -> Self {
        Self(raw)
    }
}

impl Serialize for ScaledPriceIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for ScaledPriceIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        I256::from_dec_str(&s)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// Error returned when a price index cannot be converted.
///
/// An unset index is not an error: [`to_display`] maps `None` to `0`.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PriceIndexError {
    /// The display value is NaN or infinite.
    #[error("Price index value is not finite: {0}")]
    NotFinite(f64),
    /// The value does not fit the scaled working range.
    #[error("Price index exceeds the representable scaled range")]
    PrecisionOverflow,
}

/// Converts a raw scaled index into its display value.
///
/// An unset index (`None`) displays as `0`: a pool that has not been
/// primed yet is an expected state, not a failure.
///
/// # Errors
///
/// Returns [`PriceIndexError::PrecisionOverflow`] if the stored value is
/// too large for the decimal working range.
#[cfg_attr(
    feature = "telemetry",
    instrument(name = "scrip.price.to_display", skip_all, err)
)]
pub fn to_display(raw: Option<ScaledPriceIndex>) -> Result<f64, PriceIndexError> {
    let Some(index) = raw else {
        return Ok(0.0);
    };
    let units = i128::try_from(index.0).map_err(|_| PriceIndexError::PrecisionOverflow)?;
    Decimal::try_from_i128_with_scale(units, ScaledPriceIndex::SCALE)
        .map_err(|_| PriceIndexError::PrecisionOverflow)?
        .to_f64()
        .ok_or(PriceIndexError::PrecisionOverflow)
}

/// Converts a display value into its scaled on-chain form, truncating
/// toward zero.
///
/// The multiplication runs in the decimal domain. The input enters it
/// through its shortest round-trip decimal form (its `Display` digits),
/// which parses exactly, so binary representation noise cannot shift the
/// truncation outcome in either direction: `to_scaled(1.2345)` is exactly
/// `12345`, never `12344`, and a float one ULP below `2.0` truncates to
/// `19999`, never up to `20000`.
///
/// # Errors
///
/// Returns [`PriceIndexError::NotFinite`] for NaN or infinite input and
/// [`PriceIndexError::PrecisionOverflow`] for values outside the decimal
/// working range.
#[cfg_attr(
    feature = "telemetry",
    instrument(name = "scrip.price.to_scaled", skip_all, err)
)]
pub fn to_scaled(value: f64) -> Result<ScaledPriceIndex, PriceIndexError> {
    if !value.is_finite() {
        return Err(PriceIndexError::NotFinite(value));
    }
    let scaled = Decimal::from_str(&value.to_string())
        .map_err(|_| PriceIndexError::PrecisionOverflow)?
        .checked_mul(Decimal::from(ScaledPriceIndex::SCALE_FACTOR))
        .ok_or(PriceIndexError::PrecisionOverflow)?;
    let units = scaled
        .trunc()
        .to_i128()
        .ok_or(PriceIndexError::PrecisionOverflow)?;
    let raw = I256::try_from(units).map_err(|_| PriceIndexError::PrecisionOverflow)?;
    Ok(ScaledPriceIndex(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(units: i64) -> ScaledPriceIndex {
        ScaledPriceIndex::new(I256::try_from(units).unwrap())
    }

    #[test]
    fn test_to_display_unset_is_zero() {
        assert_eq!(to_display(None).unwrap(), 0.0);
    }

    #[test]
    fn test_to_display() {
        assert_eq!(to_display(Some(scaled(12345))).unwrap(), 1.2345);
        assert_eq!(to_display(Some(scaled(7))).unwrap(), 0.0007);
        assert_eq!(to_display(Some(ScaledPriceIndex::ZERO)).unwrap(), 0.0);
    }

    #[test]
    fn test_to_scaled() {
        assert_eq!(to_scaled(1.2345).unwrap(), scaled(12345));
        assert_eq!(to_scaled(0.0007).unwrap(), scaled(7));
        assert_eq!(to_scaled(0.0).unwrap(), ScaledPriceIndex::ZERO);
    }

    #[test]
    fn test_one_display_unit_is_ten_to_the_scale() {
        assert_eq!(
            to_scaled(1.0).unwrap(),
            scaled(10_i64.pow(ScaledPriceIndex::SCALE))
        );
    }

    #[test]
    fn test_to_scaled_truncates_toward_zero() {
        assert_eq!(to_scaled(-1.2345).unwrap(), scaled(-12345));
        assert_eq!(to_scaled(-1.23456789).unwrap(), scaled(-12345));
        assert_eq!(to_scaled(1.99999).unwrap(), scaled(19999));
        assert_eq!(to_scaled(0.00019).unwrap(), scaled(1));
        assert_eq!(to_scaled(-0.00019).unwrap(), scaled(-1));
    }

    #[test]
    fn test_to_scaled_tolerates_float_noise() {
        // 0.1 + 0.2 is 0.30000000000000004 in binary floating point.
        assert_eq!(to_scaled(0.1 + 0.2).unwrap(), scaled(3000));
        // Naive f64 multiplication would yield 12344.999... here.
        assert_eq!(to_scaled(1.2345).unwrap(), scaled(12345));
        assert_eq!(to_scaled(2.6754).unwrap(), scaled(26754));
    }

    #[test]
    fn test_to_scaled_one_ulp_below_boundary() {
        // 2.0 - EPSILON displays as 1.9999999999999998. All 17 of those
        // significant digits must survive into the decimal domain;
        // re-rounding them would carry the value up across the boundary.
        assert_eq!(to_scaled(2.0 - f64::EPSILON).unwrap(), scaled(19999));
        assert_eq!(to_scaled(1.0 - f64::EPSILON / 2.0).unwrap(), scaled(9999));
        // Truncation toward zero never increases magnitude.
        assert_eq!(to_scaled(-(2.0 - f64::EPSILON)).unwrap(), scaled(-19999));
    }

    #[test]
    fn test_roundtrip_from_integer_side() {
        for units in [0i64, 1, 7, 9999, 10_000, 12345, 99_999_999] {
            let display = to_display(Some(scaled(units))).unwrap();
            assert_eq!(to_scaled(display).unwrap(), scaled(units), "units {units}");
        }
    }

    #[test]
    fn test_scenario_raw_seven() {
        let display = to_display(Some(scaled(7))).unwrap();
        assert_eq!(display, 0.0007);
        assert_eq!(to_scaled(display).unwrap(), scaled(7));
    }

    #[test]
    fn test_to_scaled_rejects_non_finite() {
        assert!(matches!(
            to_scaled(f64::NAN),
            Err(PriceIndexError::NotFinite(_))
        ));
        assert!(matches!(
            to_scaled(f64::INFINITY),
            Err(PriceIndexError::NotFinite(_))
        ));
        assert!(matches!(
            to_scaled(f64::NEG_INFINITY),
            Err(PriceIndexError::NotFinite(_))
        ));
    }

    #[test]
    fn test_to_scaled_overflow() {
        assert_eq!(to_scaled(1e300), Err(PriceIndexError::PrecisionOverflow));
    }

    #[test]
    fn test_to_display_overflow() {
        let huge = ScaledPriceIndex::new(I256::MAX);
        assert_eq!(to_display(Some(huge)), Err(PriceIndexError::PrecisionOverflow));

        let wide = ScaledPriceIndex::new(I256::try_from(i128::MAX).unwrap());
        assert_eq!(to_display(Some(wide)), Err(PriceIndexError::PrecisionOverflow));
    }

    #[test]
    fn test_serialize_as_string() {
        assert_eq!(serde_json::to_string(&scaled(12345)).unwrap(), "\"12345\"");
        assert_eq!(
            serde_json::to_string(&scaled(-12345)).unwrap(),
            "\"-12345\""
        );
    }

    #[test]
    fn test_deserialize_from_string() {
        let index: ScaledPriceIndex = serde_json::from_str("\"12345\"").unwrap();
        assert_eq!(index, scaled(12345));
    }

    #[test]
    fn test_deserialize_rejects_non_numeric() {
        assert!(serde_json::from_str::<ScaledPriceIndex>("\"abc\"").is_err());
        assert!(serde_json::from_str::<ScaledPriceIndex>("12345").is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let index: ScaledPriceIndex = "12345".parse().unwrap();
        assert_eq!(index, scaled(12345));
        assert_eq!(index.to_string(), "12345");
        assert_eq!(ScaledPriceIndex::SCALE, 4);
    }
}
