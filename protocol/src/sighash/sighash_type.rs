//! Signature-hash modes.
//!
//! On the wire a sighash type is one byte: a base mode (`All`, `None`,
//! `Single`) optionally OR-ed with the `AnyOneCanPay` modifier. In memory it
//! is [`SigHashType`], which can only hold one of the six legal
//! combinations. The only way in from a raw byte is [`SigHashType::from_u8`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::SighashError;
use crate::config::{
    SIG_HASH_ALL, SIG_HASH_ANY_ONE_CAN_PAY, SIG_HASH_MASK, SIG_HASH_NONE, SIG_HASH_SINGLE,
};

/// Which outputs a signature commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigHashMode {
    /// Every output.
    All,
    /// No outputs.
    None,
    /// The output at the signing input's index, if there is one.
    Single,
}

impl SigHashMode {
    const fn flag(self) -> u8 {
        match self {
            Self::All => SIG_HASH_ALL,
            Self::None => SIG_HASH_NONE,
            Self::Single => SIG_HASH_SINGLE,
        }
    }
}

/// A validated sighash type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SigHashType {
    mode: SigHashMode,
    anyone_can_pay: bool,
}

impl SigHashType {
    pub const ALL: SigHashType = SigHashType::new(SigHashMode::All, false);
    pub const NONE: SigHashType = SigHashType::new(SigHashMode::None, false);
    pub const SINGLE: SigHashType = SigHashType::new(SigHashMode::Single, false);
    pub const ALL_ANYONE_CAN_PAY: SigHashType = SigHashType::new(SigHashMode::All, true);
    pub const NONE_ANYONE_CAN_PAY: SigHashType = SigHashType::new(SigHashMode::None, true);
    pub const SINGLE_ANYONE_CAN_PAY: SigHashType = SigHashType::new(SigHashMode::Single, true);

    /// Every legal sighash type, in flag order.
    pub const VARIANTS: [SigHashType; 6] = [
        Self::ALL,
        Self::NONE,
        Self::SINGLE,
        Self::ALL_ANYONE_CAN_PAY,
        Self::NONE_ANYONE_CAN_PAY,
        Self::SINGLE_ANYONE_CAN_PAY,
    ];

    pub const fn new(mode: SigHashMode, anyone_can_pay: bool) -> Self {
        Self {
            mode,
            anyone_can_pay,
        }
    }

    /// Parses a raw sighash byte.
    ///
    /// The modifier bit may be set or clear; once it is cleared, the
    /// remaining bits must be exactly one base mode.
    ///
    /// # Errors
    ///
    /// [`SighashError::InvalidSigHashType`] for any other value.
    pub fn from_u8(value: u8) -> Result<Self, SighashError> {
        let mode = match value & SIG_HASH_MASK {
            SIG_HASH_ALL => SigHashMode::All,
            SIG_HASH_NONE => SigHashMode::None,
            SIG_HASH_SINGLE => SigHashMode::Single,
            _ => return Err(SighashError::InvalidSigHashType(value)),
        };
        Ok(Self::new(mode, value & SIG_HASH_ANY_ONE_CAN_PAY != 0))
    }

    /// The raw byte committed to by the signature hash.
    pub const fn to_u8(self) -> u8 {
        if self.anyone_can_pay {
            self.mode.flag() | SIG_HASH_ANY_ONE_CAN_PAY
        } else {
            self.mode.flag()
        }
    }

    pub const fn mode(self) -> SigHashMode {
        self.mode
    }

    pub const fn is_anyone_can_pay(self) -> bool {
        self.anyone_can_pay
    }

    pub fn is_all(self) -> bool {
        self.mode == SigHashMode::All
    }

    pub fn is_none(self) -> bool {
        self.mode == SigHashMode::None
    }

    pub fn is_single(self) -> bool {
        self.mode == SigHashMode::Single
    }

    /// Returns the same base mode with the modifier set.
    pub const fn with_anyone_can_pay(self) -> Self {
        Self::new(self.mode, true)
    }
}

impl Default for SigHashType {
    fn default() -> Self {
        Self::ALL
    }
}

impl TryFrom<u8> for SigHashType {
    type Error = SighashError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<SigHashType> for u8 {
    fn from(value: SigHashType) -> Self {
        value.to_u8()
    }
}

impl fmt::Display for SigHashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            SigHashMode::All => "ALL",
            SigHashMode::None => "NONE",
            SigHashMode::Single => "SINGLE",
        };
        if self.anyone_can_pay {
            write!(f, "{}|ANYONECANPAY", mode)
        } else {
            f.write_str(mode)
        }
    }
}

impl Serialize for SigHashType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.to_u8())
    }
}

impl<'de> Deserialize<'de> for SigHashType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Self::from_u8(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_roundtrips_through_its_byte() {
        for variant in SigHashType::VARIANTS {
            assert_eq!(SigHashType::from_u8(variant.to_u8()).unwrap(), variant);
        }
    }

    #[test]
    fn known_flag_values() {
        assert_eq!(SigHashType::ALL.to_u8(), 0x01);
        assert_eq!(SigHashType::NONE.to_u8(), 0x02);
        assert_eq!(SigHashType::SINGLE.to_u8(), 0x04);
        assert_eq!(SigHashType::ALL_ANYONE_CAN_PAY.to_u8(), 0x81);
        assert_eq!(SigHashType::NONE_ANYONE_CAN_PAY.to_u8(), 0x82);
        assert_eq!(SigHashType::SINGLE_ANYONE_CAN_PAY.to_u8(), 0x84);
    }

    #[test]
    fn exactly_six_bytes_are_valid() {
        let valid = (0..=u8::MAX)
            .filter(|b| SigHashType::from_u8(*b).is_ok())
            .count();
        assert_eq!(valid, 6);
    }

    #[test]
    fn rejects_combined_and_empty_modes() {
        // Modifier alone, no mode, two modes at once, stray high bits.
        for raw in [0x00, 0x80, 0x03, 0x05, 0x06, 0x07, 0x83, 0x08, 0x41, 0xFF] {
            assert_eq!(
                SigHashType::from_u8(raw),
                Err(SighashError::InvalidSigHashType(raw)),
                "0x{:02x} must be rejected",
                raw
            );
        }
    }

    #[test]
    fn accessors() {
        let t = SigHashType::SINGLE_ANYONE_CAN_PAY;
        assert!(t.is_single());
        assert!(!t.is_all());
        assert!(!t.is_none());
        assert!(t.is_anyone_can_pay());
        assert_eq!(t.mode(), SigHashMode::Single);
        assert_eq!(SigHashType::NONE.with_anyone_can_pay(), SigHashType::NONE_ANYONE_CAN_PAY);
        assert_eq!(SigHashType::default(), SigHashType::ALL);
    }

    #[test]
    fn display() {
        assert_eq!(SigHashType::ALL.to_string(), "ALL");
        assert_eq!(
            SigHashType::SINGLE_ANYONE_CAN_PAY.to_string(),
            "SINGLE|ANYONECANPAY"
        );
    }

    #[test]
    fn serde_uses_raw_byte() {
        let json = serde_json::to_string(&SigHashType::NONE_ANYONE_CAN_PAY).unwrap();
        assert_eq!(json, "130");
        let parsed: SigHashType = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, SigHashType::SINGLE);
        assert!(serde_json::from_str::<SigHashType>("3").is_err());
    }
}
