//! Assertions whose strength is selected at compile time.
//!
//! Simple assertions guard the preconditions of the public API and are always active. Moderate
//! and extreme assertions check internal invariants of the propagation; they are enabled in
//! tests and with the `debug-checks` feature.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const UNITPROP_ASSERT_LEVEL_DEFINITION: u8 = UNITPROP_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const UNITPROP_ASSERT_LEVEL_DEFINITION: u8 = UNITPROP_ASSERT_EXTREME;

pub const UNITPROP_ASSERT_SIMPLE: u8 = 1;
pub const UNITPROP_ASSERT_MODERATE: u8 = 2;
pub const UNITPROP_ASSERT_EXTREME: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! unitprop_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::UNITPROP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::UNITPROP_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! unitprop_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::UNITPROP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::UNITPROP_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! unitprop_assert_eq_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::UNITPROP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::UNITPROP_ASSERT_MODERATE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! unitprop_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::UNITPROP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::UNITPROP_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
