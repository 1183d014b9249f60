//! Billing status values.
//!
//! The service overloads `billStatus`: a `getOrders` filter carries a bitmask
//! combining several statuses, while `updateStatus` requests and every
//! returned order carry exactly one status bit. The two meanings are kept
//! apart as [`BillStatusMask`] and [`BillStatusFlag`].

use {
    serde::Serialize,
    std::{
        fmt::{self, Display, Formatter},
        str::FromStr,
    },
};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BillStatusError {
    #[error("billStatus {0} is not a single status flag (expected one of 1, 2, 4, 8)")]
    NotAFlag(i64),
    #[error("billStatus mask {0} is out of range (expected 1..=15)")]
    MaskOutOfRange(i64),
    #[error("billStatus {0:?} is not an integer")]
    NotAnInteger(String),
}

/// A single billing status bit: one of 1, 2, 4 or 8.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct BillStatusFlag(u8);

impl BillStatusFlag {
    pub const ALL: [Self; 4] = [Self(1), Self(2), Self(4), Self(8)];

    pub fn new(value: i64) -> Result<Self, BillStatusError> {
        Self::ALL
            .into_iter()
            .find(|flag| i64::from(flag.0) == value)
            .ok_or(BillStatusError::NotAFlag(value))
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl FromStr for BillStatusFlag {
    type Err = BillStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| BillStatusError::NotAnInteger(s.to_string()))?;
        Self::new(value)
    }
}

impl Display for BillStatusFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bitwise OR of one or more [`BillStatusFlag`]s, used to filter a query.
/// Valid masks lie in `1..=15`; `0` would match nothing and is rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BillStatusMask(u8);

impl BillStatusMask {
    pub fn new(value: i64) -> Result<Self, BillStatusError> {
        match u8::try_from(value) {
            Ok(bits @ 1..=15) => Ok(Self(bits)),
            _ => Err(BillStatusError::MaskOutOfRange(value)),
        }
    }

    /// Combines the flags with a bitwise OR. Returns `None` when no flag is
    /// given, which the service interprets as "no filter".
    pub fn from_flags(flags: impl IntoIterator<Item = BillStatusFlag>) -> Option<Self> {
        let bits = flags.into_iter().fold(0, |mask, flag| mask | flag.bits());
        (bits != 0).then_some(Self(bits))
    }

    pub fn contains(self, flag: BillStatusFlag) -> bool {
        self.0 & flag.bits() != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl Display for BillStatusMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[test]
    fn flag_accepts_single_bits_only() {
        for value in [1, 2, 4, 8] {
            assert_eq!(i64::from(BillStatusFlag::new(value).unwrap().bits()), value);
        }
        for value in [-1, 0, 3, 5, 9, 15, 16, 256] {
            assert_eq!(
                BillStatusFlag::new(value),
                Err(BillStatusError::NotAFlag(value))
            );
        }
    }

    #[test]
    fn flag_from_str() {
        assert_eq!("4".parse::<BillStatusFlag>().unwrap().bits(), 4);
        assert_eq!(
            "x".parse::<BillStatusFlag>(),
            Err(BillStatusError::NotAnInteger("x".to_string()))
        );
        assert_eq!(
            "3".parse::<BillStatusFlag>(),
            Err(BillStatusError::NotAFlag(3))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(16)]
    #[case(-1)]
    #[case(255)]
    #[case(i64::MAX)]
    fn mask_rejects_out_of_range(#[case] value: i64) {
        assert_eq!(
            BillStatusMask::new(value),
            Err(BillStatusError::MaskOutOfRange(value))
        );
    }

    #[test]
    fn mask_membership_matches_bits() {
        for mask in 1..=15 {
            let parsed = BillStatusMask::new(mask).unwrap();
            for flag in BillStatusFlag::ALL {
                let expected = mask & i64::from(flag.bits()) != 0;
                assert_eq!(parsed.contains(flag), expected, "mask {mask} flag {flag}");
            }
        }
    }

    #[test]
    fn mask_from_flags() {
        assert_eq!(BillStatusMask::from_flags(Vec::new()), None);

        let flags = ["1", "8"].map(|s| s.parse::<BillStatusFlag>().unwrap());
        let mask = BillStatusMask::from_flags(flags).unwrap();
        assert_eq!(mask.bits(), 9);

        // Repeating a flag does not change the mask.
        let flag = BillStatusFlag::new(2).unwrap();
        assert_eq!(BillStatusMask::from_flags([flag, flag]).unwrap().bits(), 2);

        assert_eq!(
            BillStatusMask::from_flags(BillStatusFlag::ALL),
            BillStatusMask::new(15).ok()
        );
    }

    #[test]
    fn serializes_as_plain_integers() {
        assert_eq!(
            serde_json::to_string(&BillStatusMask::new(9).unwrap()).unwrap(),
            "9"
        );
        assert_eq!(
            serde_json::to_string(&BillStatusFlag::new(8).unwrap()).unwrap(),
            "8"
        );
    }
}
