/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

// RelativeUnit is a superclass in C++.
// Units that can be added to and scaled by themselves: sizes, rates and deltas.
macro_rules! relative_unit {
    ($ty:ident) => {
        crate::api::units::unit_base!($ty);

        impl $ty {
            pub fn clamped(&self, min_value: Self, max_value: Self) -> Self {
                Self(self.0.max(min_value.0).min(max_value.0))
            }

            // Not `clamp`: `Ord::clamp` takes `self` by value and would shadow it.
            pub fn clamp_in_place(&mut self, min_value: Self, max_value: Self) {
                *self = self.clamped(min_value, max_value);
            }
        }

        impl ::std::ops::Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                if self.is_plus_infinity() || rhs.is_plus_infinity() {
                    assert!(!self.is_minus_infinity());
                    assert!(!rhs.is_minus_infinity());
                    return Self::plus_infinity();
                } else if self.is_minus_infinity() || rhs.is_minus_infinity() {
                    assert!(!self.is_plus_infinity());
                    assert!(!rhs.is_plus_infinity());
                    return Self::minus_infinity();
                }
                Self::from_value(self.to_value() + rhs.to_value())
            }
        }

        impl ::std::ops::Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                if self.is_plus_infinity() || rhs.is_minus_infinity() {
                    assert!(!self.is_minus_infinity());
                    assert!(!rhs.is_plus_infinity());
                    return Self::plus_infinity();
                } else if self.is_minus_infinity() || rhs.is_plus_infinity() {
                    assert!(!self.is_plus_infinity());
                    assert!(!rhs.is_minus_infinity());
                    return Self::minus_infinity();
                }
                Self::from_value(self.to_value() - rhs.to_value())
            }
        }

        impl ::std::ops::AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl ::std::ops::SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl ::std::ops::Div for $ty {
            type Output = f64;

            fn div(self, rhs: Self) -> Self::Output {
                self.to_value_float() / rhs.to_value_float()
            }
        }

        impl ::std::ops::Div<f64> for $ty {
            type Output = Self;

            fn div(self, rhs: f64) -> Self::Output {
                Self::from_value_float((self.to_value_float() / rhs).round())
            }
        }

        impl ::std::ops::Div<i64> for $ty {
            type Output = Self;

            fn div(self, rhs: i64) -> Self::Output {
                Self::from_value(self.to_value() / rhs)
            }
        }

        impl ::std::ops::Mul<f64> for $ty {
            type Output = Self;

            fn mul(self, rhs: f64) -> Self::Output {
                Self::from_value_float((self.to_value_float() * rhs).round())
            }
        }

        impl ::std::ops::Mul<f32> for $ty {
            type Output = Self;

            fn mul(self, rhs: f32) -> Self::Output {
                self * rhs as f64
            }
        }

        impl ::std::ops::Mul<i64> for $ty {
            type Output = Self;

            fn mul(self, rhs: i64) -> Self::Output {
                Self::from_value(self.to_value() * rhs)
            }
        }

        impl ::std::ops::Mul<$ty> for f64 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> Self::Output {
                rhs * self
            }
        }

        impl ::std::ops::Mul<$ty> for f32 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> Self::Output {
                rhs * self
            }
        }

        impl ::std::ops::Mul<$ty> for i64 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> Self::Output {
                rhs * self
            }
        }
    };
}

pub(crate) use relative_unit;

#[cfg(test)]
mod test {
    use std::fmt;

    use test_trace::test;

    relative_unit!(TestUnit);

    impl TestUnit {
        const ONE_SIDED: bool = false;

        const fn from_kilo(kilo: i64) -> Self {
            Self::from_fraction(1000, kilo)
        }

        const fn to_kilo(&self) -> i64 {
            self.to_fraction(1000)
        }

        const fn to_kilo_or(&self, fallback: i64) -> i64 {
            self.to_fraction_or(1000, fallback)
        }
    }

    impl fmt::Debug for TestUnit {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[test]
    fn infinity_is_ordered_around_finite_values() {
        const VALUE: i64 = -12345;
        assert!(TestUnit::zero().is_zero());
        assert!(TestUnit::plus_infinity() > TestUnit::from_kilo(VALUE.abs()));
        assert!(TestUnit::minus_infinity() < TestUnit::from_kilo(VALUE));
        assert_eq!(TestUnit::plus_infinity().to_kilo_or(-1), -1);
        assert_eq!(TestUnit::from_kilo(VALUE).to_kilo_or(0), VALUE);
    }

    #[test]
    fn rounds_to_nearest_on_conversion() {
        assert_eq!(TestUnit::from_value(1499).to_kilo(), 1);
        assert_eq!(TestUnit::from_value(1500).to_kilo(), 2);
        assert_eq!(TestUnit::from_value(-1500).to_kilo(), -2);
        assert_eq!(TestUnit::from_value(-1499).to_kilo(), -1);
    }

    #[test]
    fn clamping() {
        let lower = TestUnit::from_value(100);
        let upper = TestUnit::from_value(800);
        assert_eq!(TestUnit::from_value(50).clamped(lower, upper), lower);
        assert_eq!(TestUnit::from_value(500).clamped(lower, upper).0, 500);
        let mut over = TestUnit::from_value(1000);
        over.clamp_in_place(lower, upper);
        assert_eq!(over, upper);
        let mut under = TestUnit::from_value(-5);
        under.clamp_in_place(lower, upper);
        assert_eq!(under, lower);
    }

    #[test]
    fn math_operations() {
        const VALUE_A: i64 = 267;
        const VALUE_B: i64 = 450;
        let a = TestUnit::from_kilo(VALUE_A);
        let b = TestUnit::from_kilo(VALUE_B);
        assert_eq!((a + b).to_kilo(), VALUE_A + VALUE_B);
        assert_eq!((a - b).to_kilo(), VALUE_A - VALUE_B);
        assert_eq!((TestUnit::from_value(VALUE_A) * VALUE_B).0, VALUE_A * VALUE_B);
        assert_eq!((TestUnit::from_value(VALUE_A) * 0.5f64).0, 134);
        assert_eq!((0.5f32 * TestUnit::from_value(VALUE_A)).0, 134);
        assert_eq!(b / a, VALUE_B as f64 / VALUE_A as f64);

        // Division by an int rounds towards zero to follow regular int division.
        assert_eq!(TestUnit::from_value(789) / 10, TestUnit::from_value(78));
        assert_eq!(TestUnit::from_value(-789) / 10, TestUnit::from_value(-78));
    }

    #[test]
    fn infinity_operations() {
        let finite = TestUnit::from_value(267);
        assert!((TestUnit::plus_infinity() + finite).is_plus_infinity());
        assert!((TestUnit::plus_infinity() - finite).is_plus_infinity());
        assert!((finite - TestUnit::minus_infinity()).is_plus_infinity());
        assert!((TestUnit::minus_infinity() + finite).is_minus_infinity());
        assert!((finite - TestUnit::plus_infinity()).is_minus_infinity());
    }

    #[test]
    #[should_panic]
    fn crashes_when_created_from_nan() {
        TestUnit::from_value_float(f64::NAN);
    }
}
