#![cfg(feature = "zeroize")]

use super::BigUint;
use crate::bigint::{BigInt, Repr};

impl zeroize::Zeroize for BigUint {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

impl zeroize::Zeroize for BigInt {
    fn zeroize(&mut self) {
        match &mut self.repr {
            Repr::Small(v) => v.zeroize(),
            Repr::Large(_, mag) => {
                mag.zeroize();
                // leave the canonical encoding of zero behind
                self.repr = Repr::Small(0);
            }
        }
    }
}
