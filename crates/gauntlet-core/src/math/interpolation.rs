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

use num_traits::Float;

/// Linearly interpolates the value at `x` on the line through `(x0, y0)` and `(x1, y1)`.
///
/// `x` is not clamped, so values outside `[x0, x1]` extrapolate. A degenerate
/// segment (`x0 == x1`) yields `y0`.
///
/// ```rust
/// use gauntlet_core::math::interpolation::lerp;
///
/// // A schedule that starts hot (10.0) and ends cold (2.0) over steps 0..=4.
/// assert_eq!(lerp(0.0, 0.0, 4.0, 10.0, 2.0), 10.0);
/// assert_eq!(lerp(2.0, 0.0, 4.0, 10.0, 2.0), 6.0);
/// assert_eq!(lerp(4.0, 0.0, 4.0, 10.0, 2.0), 2.0);
/// ```
#[inline]
pub fn lerp<F>(x: F, x0: F, x1: F, y0: F, y1: F) -> F
where
    F: Float,
{
    let span = x1 - x0;
    if span == F::zero() {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / span
}

#[cfg(test)]
mod tests {
    use super::lerp;

    #[test]
    fn test_endpoints_are_reproduced() {
        assert_eq!(lerp(3.0_f64, 3.0, 7.0, -1.0, 1.0), -1.0);
        assert_eq!(lerp(7.0_f64, 3.0, 7.0, -1.0, 1.0), 1.0);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(lerp(5.0_f64, 3.0, 7.0, -1.0, 1.0), 0.0);
    }

    #[test]
    fn test_degenerate_segment_returns_start_value() {
        assert_eq!(lerp(0.0_f64, 0.0, 0.0, 8.0, 1.0), 8.0);
    }

    #[test]
    fn test_extrapolates_beyond_segment() {
        assert_eq!(lerp(2.0_f64, 0.0, 1.0, 0.0, 1.0), 2.0);
    }
}
