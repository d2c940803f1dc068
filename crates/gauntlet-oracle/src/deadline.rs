// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Phase Deadlines
//!
//! A `PhaseDeadline` is a shared, absolute wall-clock instant. Every oracle of
//! a phase holds a clone of the same deadline, so arming it once at phase
//! start is observed by all of them. Testing re-arms the deadline before each
//! instance.
//!
//! The deadline is checked on every evaluation; there is no timer thread. A
//! deadline that has never been armed counts as exceeded, so an oracle cannot
//! be used before its phase has started.
//!
//! ## Usage
//!
//! ```rust
//! use gauntlet_oracle::deadline::PhaseDeadline;
//! use std::time::Duration;
//!
//! let deadline = PhaseDeadline::new();
//! assert!(deadline.is_exceeded());
//!
//! deadline.arm(Duration::from_secs(60));
//! assert!(!deadline.is_exceeded());
//! ```

use parking_lot::RwLock;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Default)]
pub struct PhaseDeadline {
    at: Arc<RwLock<Option<Instant>>>,
}

impl PhaseDeadline {
    /// Creates an unarmed deadline.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the deadline `limit` from now and returns the resulting instant.
    ///
    /// A limit too large to represent leaves the deadline unbounded in
    /// practice; it is clamped to roughly a century from now.
    #[inline]
    pub fn arm(&self, limit: Duration) -> Instant {
        let now = Instant::now();
        let at = now
            .checked_add(limit)
            .or_else(|| now.checked_add(Duration::from_secs(100 * 365 * 24 * 3600)))
            .unwrap_or(now);
        self.arm_at(at);
        at
    }

    /// Arms the deadline at an absolute instant, which may lie in the past.
    #[inline]
    pub fn arm_at(&self, at: Instant) {
        *self.at.write() = Some(at);
    }

    #[inline]
    pub fn disarm(&self) {
        *self.at.write() = None;
    }

    #[inline]
    pub fn instant(&self) -> Option<Instant> {
        *self.at.read()
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.instant().is_some()
    }

    /// Returns `true` if the deadline has passed or was never armed.
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        match self.instant() {
            Some(at) => Instant::now() > at,
            None => true,
        }
    }


    /// Returns `true` if both handles observe the same deadline.
    #[inline]
    pub fn is_shared_with(&self, other: &PhaseDeadline) -> bool {
        Arc::ptr_eq(&self.at, &other.at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_deadline_is_exceeded() {
        let d = PhaseDeadline::new();
        assert!(!d.is_armed());
        assert!(d.is_exceeded());
        assert_eq!(d.instant(), None);
    }

    #[test]
    fn test_armed_in_future_is_not_exceeded() {
        let d = PhaseDeadline::new();
        let at = d.arm(Duration::from_secs(3600));
        assert!(d.is_armed());
        assert!(!d.is_exceeded());
        assert_eq!(d.instant(), Some(at));
        assert!(at > Instant::now() + Duration::from_secs(3500));
    }

    #[test]
    fn test_armed_in_past_is_exceeded() {
        let d = PhaseDeadline::new();
        d.arm_at(Instant::now() - Duration::from_millis(1));
        assert!(d.is_exceeded());
    }

    #[test]
    fn test_clones_observe_rearming() {
        let a = PhaseDeadline::new();
        let b = a.clone();
        assert!(a.is_shared_with(&b));

        a.arm(Duration::from_secs(60));
        assert!(!b.is_exceeded());

        b.disarm();
        assert!(a.is_exceeded());
    }

    #[test]
    fn test_huge_limit_does_not_panic() {
        let d = PhaseDeadline::new();
        d.arm(Duration::MAX);
        assert!(!d.is_exceeded());
    }
}
