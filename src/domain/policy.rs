//! Channel size policy.
//!
//! The pure half of the acceptance decision: given the peer's class and the
//! proposed funding amount, decide whether the size is acceptable. Peer
//! classification itself happens elsewhere (see
//! [`PeerClassifier`](crate::port::PeerClassifier)).

use std::fmt;

use serde::Serialize;

/// Default lower bound for both peer classes, in satoshis.
pub const DEFAULT_MIN_CHANNEL_SIZE: u64 = 0;

/// Default upper bound for both peer classes, in satoshis.
///
/// `2^24 - 1`, the largest channel allowed without large-channel support.
pub const DEFAULT_MAX_CHANNEL_SIZE: u64 = 16_777_215;

/// Visibility of a peer in the public channel graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerClass {
    /// Not announced, or announced without public channels.
    Private,
    /// Announced with at least one public channel.
    Public,
}

impl PeerClass {
    /// Map the classifier's boolean answer (`true` = private).
    #[must_use]
    pub const fn from_is_private(is_private: bool) -> Self {
        if is_private {
            Self::Private
        } else {
            Self::Public
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for PeerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Funding amount bounds for one peer class. Both ends are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeBounds {
    pub min: u64,
    pub max: u64,
}

impl SizeBounds {
    #[must_use]
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Check an amount against the bounds.
    #[must_use]
    pub const fn check(&self, funding_amt: u64) -> Verdict {
        if funding_amt <= self.min {
            Verdict::BelowMinimum { min: self.min }
        } else if funding_amt >= self.max {
            Verdict::AboveMaximum { max: self.max }
        } else {
            Verdict::Accept
        }
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CHANNEL_SIZE, DEFAULT_MAX_CHANNEL_SIZE)
    }
}

/// Outcome of a size check, kept for the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    BelowMinimum { min: u64 },
    AboveMaximum { max: u64 },
}

impl Verdict {
    #[must_use]
    pub const fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("within bounds"),
            Self::BelowMinimum { min } => write!(f, "at or below minimum {min}"),
            Self::AboveMaximum { max } => write!(f, "at or above maximum {max}"),
        }
    }
}

/// Size thresholds per peer class.
///
/// Built once from configuration and never mutated while an acceptor runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizePolicy {
    pub private: SizeBounds,
    pub public: SizeBounds,
}

impl SizePolicy {
    #[must_use]
    pub const fn new(private: SizeBounds, public: SizeBounds) -> Self {
        Self { private, public }
    }

    /// Bounds that apply to `class`.
    #[must_use]
    pub const fn bounds(&self, class: PeerClass) -> SizeBounds {
        match class {
            PeerClass::Private => self.private,
            PeerClass::Public => self.public,
        }
    }

    /// Evaluate a funding amount for a peer of the given class.
    #[must_use]
    pub const fn evaluate(&self, class: PeerClass, funding_amt: u64) -> Verdict {
        self.bounds(class).check(funding_amt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_policy() -> SizePolicy {
        SizePolicy::new(
            SizeBounds::new(0, 2_000_000),
            SizeBounds::new(4_000_000, 16_777_215),
        )
    }

    #[test]
    fn private_peer_within_bounds_is_accepted() {
        let verdict = test_policy().evaluate(PeerClass::Private, 1_000_000);
        assert_eq!(verdict, Verdict::Accept);
    }

    #[test]
    fn private_peer_above_max_is_rejected() {
        let verdict = test_policy().evaluate(PeerClass::Private, 3_000_000);
        assert_eq!(verdict, Verdict::AboveMaximum { max: 2_000_000 });
    }

    #[test]
    fn public_peer_below_min_is_rejected() {
        let verdict = test_policy().evaluate(PeerClass::Public, 3_000_000);
        assert_eq!(verdict, Verdict::BelowMinimum { min: 4_000_000 });
    }

    #[test]
    fn public_peer_within_bounds_is_accepted() {
        assert!(test_policy()
            .evaluate(PeerClass::Public, 5_000_000)
            .is_accept());
    }

    #[test]
    fn bounds_are_exclusive() {
        let policy = test_policy();
        assert!(!policy.evaluate(PeerClass::Private, 0).is_accept());
        assert!(!policy.evaluate(PeerClass::Private, 2_000_000).is_accept());
        assert!(!policy.evaluate(PeerClass::Public, 4_000_000).is_accept());
        assert!(!policy.evaluate(PeerClass::Public, 16_777_215).is_accept());

        assert!(policy.evaluate(PeerClass::Private, 1).is_accept());
        assert!(policy.evaluate(PeerClass::Private, 1_999_999).is_accept());
        assert!(policy.evaluate(PeerClass::Public, 4_000_001).is_accept());
        assert!(policy.evaluate(PeerClass::Public, 16_777_214).is_accept());
    }

    #[test]
    fn class_selects_threshold_pair_regardless_of_amount() {
        let policy = test_policy();
        for amt in [1, 1_000_000, 3_000_000, 5_000_000, 20_000_000] {
            assert_eq!(
                policy.evaluate(PeerClass::Private, amt),
                policy.private.check(amt)
            );
            assert_eq!(
                policy.evaluate(PeerClass::Public, amt),
                policy.public.check(amt)
            );
        }
    }

    #[test]
    fn empty_range_rejects_everything() {
        let bounds = SizeBounds::new(100, 100);
        assert!(!bounds.check(99).is_accept());
        assert!(!bounds.check(100).is_accept());
        assert!(!bounds.check(101).is_accept());
    }

    #[test]
    fn defaults_span_the_non_wumbo_range() {
        let policy = SizePolicy::default();
        assert_eq!(policy.private, SizeBounds::new(0, 16_777_215));
        assert_eq!(policy.public, SizeBounds::new(0, 16_777_215));
    }

    #[test]
    fn classifier_boolean_maps_to_class() {
        assert_eq!(PeerClass::from_is_private(true), PeerClass::Private);
        assert_eq!(PeerClass::from_is_private(false), PeerClass::Public);
    }
}
