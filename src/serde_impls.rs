//! Serde support: every value type round-trips through its canonical
//! decimal string, the same encoding the string constructors accept.

#![cfg(feature = "serde")]
#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

use crate::{BigDecimal, BigInt, BigUint};

use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

macro_rules! serde_via_string {
    ($ty:ident, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct Visitor;

                impl de::Visitor<'_> for Visitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                        $ty::from_str(v).map_err(de::Error::custom)
                    }
                }

                deserializer.deserialize_str(Visitor)
            }
        }
    };
}

serde_via_string!(BigUint, "a decimal string of an unsigned integer");
serde_via_string!(BigInt, "a decimal string of an integer");
serde_via_string!(BigDecimal, "a decimal number string");

#[cfg(test)]
mod tests {
    use crate::{BigDecimal, BigInt, BigUint};

    use core::str::FromStr;

    #[test]
    fn test_string_round_trip() {
        let i = BigInt::from_str("-123456789012345678901234567890").unwrap();
        let json = serde_json::to_string(&i).unwrap();
        assert_eq!(json, "\"-123456789012345678901234567890\"");
        assert_eq!(serde_json::from_str::<BigInt>(&json).unwrap(), i);

        let u = BigUint::from_str("340282366920938463463374607431768211456").unwrap();
        let json = serde_json::to_string(&u).unwrap();
        assert_eq!(serde_json::from_str::<BigUint>(&json).unwrap(), u);

        let d = BigDecimal::from_str("-1.25E+7").unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"-1.25E+7\"");
        assert_eq!(serde_json::from_str::<BigDecimal>(&json).unwrap(), d);
    }

    #[test]
    fn test_scale_survives() {
        // 1.0 and 1.00 are structurally different and must stay that way
        let a = BigDecimal::from_str("1.0").unwrap();
        let b = BigDecimal::from_str("1.00").unwrap();
        let ja = serde_json::to_string(&a).unwrap();
        let jb = serde_json::to_string(&b).unwrap();
        assert_ne!(ja, jb);
        assert_eq!(serde_json::from_str::<BigDecimal>(&ja).unwrap(), a);
        assert_eq!(serde_json::from_str::<BigDecimal>(&jb).unwrap(), b);
    }

    #[test]
    fn test_reject_garbage() {
        assert!(serde_json::from_str::<BigInt>("\"12a\"").is_err());
        assert!(serde_json::from_str::<BigDecimal>("\"\"").is_err());
    }
}
