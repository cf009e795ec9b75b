// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::{fmt, ops, time::Duration};

/// An absolute point in time, relative to the epoch of the [`Clock`](super::Clock) that
/// produced it
///
/// Timestamps are only meaningful when compared against other timestamps from the same clock.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(Duration);

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if *self == Self::MAX {
            return f.write_str("Timestamp(MAX)");
        }
        write!(f, "Timestamp({:?})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Timestamp {
    /// A timestamp that compares greater than every timestamp a clock can return
    pub const MAX: Self = Self(Duration::MAX);

    /// Creates a `Timestamp` from a `Duration` since the clock epoch
    #[inline]
    pub const fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    /// Returns the `Duration` since the clock epoch
    #[inline]
    pub const fn as_duration(self) -> Duration {
        self.0
    }

    /// Returns the amount of time elapsed from `earlier` to `self`, or zero if `earlier`
    /// is later than `self`
    #[inline]
    pub fn saturating_duration_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        self.0.checked_add(duration).map(Self)
    }

    #[inline]
    pub fn checked_sub(self, duration: Duration) -> Option<Self> {
        self.0.checked_sub(duration).map(Self)
    }

    /// Returns `true` if the timestamp is at or before `now`
    #[inline]
    pub fn has_elapsed(self, now: Self) -> bool {
        self <= now
    }
}

impl ops::Add<Duration> for Timestamp {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl ops::AddAssign<Duration> for Timestamp {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs;
    }
}

impl ops::Sub for Timestamp {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        self.0 - rhs.0
    }
}

impl ops::Sub<Duration> for Timestamp {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_test() {
        let a = Timestamp::from_duration(Duration::from_millis(10));
        let b = a + Duration::from_millis(5);

        assert_eq!(b - a, Duration::from_millis(5));
        assert_eq!(b - Duration::from_millis(5), a);
        assert_eq!(a.saturating_duration_since(b), Duration::ZERO);
        assert_eq!(a.checked_sub(Duration::from_secs(1)), None);
        assert!(a.has_elapsed(b));
        assert!(!b.has_elapsed(a));
    }

    #[test]
    fn max_is_largest_test() {
        let t = Timestamp::from_duration(Duration::from_secs(u32::MAX as u64));
        assert!(Timestamp::MAX > t);
        assert_eq!(Timestamp::MAX.checked_add(Duration::from_nanos(1)), None);
        assert_eq!(format!("{:?}", Timestamp::MAX), "Timestamp(MAX)");
    }
}
