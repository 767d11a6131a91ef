//! Chain identifier normalization for wallet and signing flows.
//!
//! Network identifiers reach the application in whatever shape the
//! upstream library prefers: hexadecimal strings from wallet connectors,
//! decimal strings from query parameters, native numbers from UI state,
//! and arbitrary-precision integers from signing libraries. Everything
//! funnels through [`normalize`] so that no call site re-implements base
//! detection.
//!
//! - [`ChainId`] - The canonical EIP-155 chain identifier
//! - [`ChainIdInput`] - A chain identifier as it arrives at the boundary
//! - [`normalize`] - Canonicalizes any supported source form
//! - [`ChainIdError`] - Typed rejection of malformed input

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use crate::networks;

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// A canonical EIP-155 chain identifier.
///
/// Every chain identifier entering the system is reduced to this single
/// integer form before it is compared, embedded in a signed payload, or
/// used in a network-switch request. Comparing raw inputs of different
/// representations is never valid.
///
/// # Serialization
///
/// Serializes as a JSON number. Deserializes from a number or from a
/// decimal/`0x`-hexadecimal string, routed through [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(u64);

impl ChainId {
    /// Creates a chain ID from a canonical integer value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the canonical integer value.
    #[must_use]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Formats this chain ID as a CAIP-2 identifier.
    ///
    /// Example: `ChainId::new(42220).caip2()` returns `"eip155:42220"`.
    #[must_use]
    pub fn caip2(&self) -> String {
        format!("eip155:{}", self.0)
    }

    /// Parses a CAIP-2 identifier into a chain ID.
    ///
    /// Returns `None` if the input is not a valid `eip155:` prefixed string.
    #[must_use]
    pub fn from_caip2(caip: &str) -> Option<Self> {
        caip.strip_prefix("eip155:")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Self)
    }

    /// Creates a chain ID from a well-known network name.
    ///
    /// This method looks up the network name in the registry of known
    /// networks (see [`crate::networks`]).
    #[must_use]
    pub fn from_network_name(name: &str) -> Option<Self> {
        networks::chain_id_by_network_name(name)
    }

    /// Returns the well-known network name for this chain ID, if any.
    ///
    /// This is the reverse of [`ChainId::from_network_name`].
    #[must_use]
    pub fn as_network_name(&self) -> Option<&'static str> {
        networks::network_name_by_chain_id(*self)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(ChainIdInput::from_text(s))
    }
}

impl TryFrom<U256> for ChainId {
    type Error = ChainIdError;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        normalize(ChainIdInput::Big(value))
    }
}

impl Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ChainIdVisitor;

        impl de::Visitor<'_> for ChainIdVisitor {
            type Value = ChainId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a chain id as an integer or a decimal/hex string")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ChainId(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map(ChainId)
                    .map_err(|_| E::custom(ChainIdError::NegativeValueRejected(v.to_string())))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ChainIdVisitor)
    }
}

/// Error returned when a chain identifier cannot be canonicalized.
///
/// Malformed input is always surfaced as a typed failure, never silently
/// coerced to zero. Each variant carries the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainIdError {
    /// The input is not a valid decimal or hexadecimal numeral.
    #[error("Invalid numeric format for chain id: {0}")]
    InvalidNumericFormat(String),
    /// The input resolved to a negative number.
    #[error("Negative chain id rejected: {0}")]
    NegativeValueRejected(String),
    /// The value does not fit the canonical 64-bit range.
    #[error("Chain id exceeds the canonical 64-bit range: {0}")]
    PrecisionOverflow(String),
}

/// A chain identifier as it arrives from a wallet, form, or signing library.
///
/// Constructed at the boundary where the raw value first enters the
/// system, so that [`normalize`] stays a single exhaustive match:
///
/// - [`Decimal`](Self::Decimal) - base-10 digits, e.g. `"42220"`
/// - [`Hex`](Self::Hex) - `0x`-prefixed base-16 digits, e.g. `"0xa4ec"`
/// - [`Native`](Self::Native) - an integer already in canonical form
/// - [`Big`](Self::Big) - an arbitrary-precision integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainIdInput {
    /// A base-10 string; leading `+` and surrounding whitespace tolerated.
    Decimal(String),
    /// A base-16 string with a case-insensitive `0x` prefix.
    Hex(String),
    /// A native integer, canonical by construction.
    Native(u64),
    /// An arbitrary-precision integer, e.g. from a signing library.
    Big(U256),
}

impl ChainIdInput {
    /// Tags a raw string as [`Hex`](Self::Hex) or [`Decimal`](Self::Decimal)
    /// by its `0x`/`0X` prefix, ignoring surrounding whitespace.
    ///
    /// Base detection happens here, once: `"0x10"` is sixteen, never ten.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            Self::Hex(trimmed.to_owned())
        } else {
            Self::Decimal(trimmed.to_owned())
        }
    }
}

impl From<&str> for ChainIdInput {
    fn from(raw: &str) -> Self {
        Self::from_text(raw)
    }
}

impl From<u64> for ChainIdInput {
    fn from(id: u64) -> Self {
        Self::Native(id)
    }
}

impl From<U256> for ChainIdInput {
    fn from(id: U256) -> Self {
        Self::Big(id)
    }
}

/// Canonicalizes a chain identifier from any supported source form.
///
/// String forms are trimmed before parsing. Hexadecimal input loses its
/// case-insensitive `0x` prefix and parses as base-16; decimal input
/// parses as base-10 with an optional leading `+`. Big integers narrow
/// only when they fit the canonical range, without any floating
/// intermediate; native integers pass through unchanged.
///
/// # Errors
///
/// Returns [`ChainIdError::InvalidNumericFormat`] for non-numeric text,
/// [`ChainIdError::NegativeValueRejected`] for negative values, and
/// [`ChainIdError::PrecisionOverflow`] for values above `u64::MAX`.
#[cfg_attr(
    feature = "telemetry",
    instrument(name = "scrip.chain.normalize", skip_all, err)
)]
pub fn normalize(input: ChainIdInput) -> Result<ChainId, ChainIdError> {
    match input {
        ChainIdInput::Decimal(text) => parse_decimal(&text),
        ChainIdInput::Hex(text) => parse_hex(&text),
        ChainIdInput::Native(id) => Ok(ChainId(id)),
        ChainIdInput::Big(id) => {
            if id > U256::from(u64::MAX) {
                return Err(ChainIdError::PrecisionOverflow(id.to_string()));
            }
            Ok(ChainId(id.to::<u64>()))
        }
    }
}

/// Parses base-10 digits through a wider integer so the sign and the
/// magnitude of out-of-range input stay distinguishable.
fn parse_decimal(text: &str) -> Result<ChainId, ChainIdError> {
    let digits = text.trim();
    match digits.parse::<i128>() {
        Ok(value) if value < 0 => Err(ChainIdError::NegativeValueRejected(digits.to_owned())),
        Ok(value) => u64::try_from(value)
            .map(ChainId)
            .map_err(|_| ChainIdError::PrecisionOverflow(digits.to_owned())),
        Err(err) => Err(match err.kind() {
            IntErrorKind::NegOverflow => ChainIdError::NegativeValueRejected(digits.to_owned()),
            IntErrorKind::PosOverflow => ChainIdError::PrecisionOverflow(digits.to_owned()),
            _ => ChainIdError::InvalidNumericFormat(digits.to_owned()),
        }),
    }
}

fn parse_hex(text: &str) -> Result<ChainId, ChainIdError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(ChainIdError::InvalidNumericFormat(trimmed.to_owned()));
    }
    u64::from_str_radix(digits, 16)
        .map(ChainId)
        .map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow => ChainIdError::PrecisionOverflow(trimmed.to_owned()),
            _ => ChainIdError::InvalidNumericFormat(trimmed.to_owned()),
        })
}
