//! Operator-forwarding macros.
//!
//! Binary operators are implemented once for `&T op &T`; these macros forward
//! the owned/borrowed combinations to that single implementation.

macro_rules! forward_val_val_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $imp::$method(&self, &other)
            }
        }
    };
}

macro_rules! forward_val_ref_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<&$res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                $imp::$method(&self, other)
            }
        }
    };
}

macro_rules! forward_ref_val_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for &$res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $imp::$method(self, &other)
            }
        }
    };
}

macro_rules! forward_all_binop_to_ref_ref {
    (impl $imp:ident for $res:ty, $method:ident) => {
        forward_val_val_binop!(impl $imp for $res, $method);
        forward_val_ref_binop!(impl $imp for $res, $method);
        forward_ref_val_binop!(impl $imp for $res, $method);
    };
}

/// Forward `T op scalar` and `&T op scalar` to a `(&T, scalar)` function,
/// and the commuted `scalar op T` forms for commutative operators.
macro_rules! forward_scalar_binop {
    (impl $imp:ident<$scalar:ty> for $res:ty, $method:ident = $func:path) => {
        impl $imp<$scalar> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $scalar) -> $res {
                $func(&self, other)
            }
        }

        impl $imp<$scalar> for &$res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $scalar) -> $res {
                $func(self, other)
            }
        }
    };
}

macro_rules! forward_scalar_binop_commutative {
    (impl $imp:ident<$scalar:ty> for $res:ty, $method:ident = $func:path) => {
        forward_scalar_binop!(impl $imp<$scalar> for $res, $method = $func);

        impl $imp<$res> for $scalar {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $func(&other, self)
            }
        }

        impl $imp<&$res> for $scalar {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                $func(other, self)
            }
        }
    };
}
