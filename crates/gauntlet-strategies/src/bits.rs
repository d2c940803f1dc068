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

//! Bit-vector helpers shared by the strategies.

use rand::Rng;

/// A uniformly random bit-vector of length `n`.
#[inline]
pub fn random_bitvector<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<bool> {
    (0..n).map(|_| rng.random::<bool>()).collect()
}

/// Overwrites `bits` with uniformly random values.
#[inline]
pub fn randomize<R: Rng + ?Sized>(rng: &mut R, bits: &mut [bool]) {
    bits.iter_mut().for_each(|b| *b = rng.random::<bool>());
}

/// Flips one uniformly chosen bit and returns its position. Does nothing on
/// an empty slice and returns `None`.
#[inline]
pub fn flip_random<R: Rng + ?Sized>(rng: &mut R, bits: &mut [bool]) -> Option<usize> {
    if bits.is_empty() {
        return None;
    }
    let i = rng.random_range(0..bits.len());
    bits[i] = !bits[i];
    Some(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_bitvector_length_and_mix() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let v = random_bitvector(&mut rng, 256);
        assert_eq!(v.len(), 256);
        let ones = v.iter().filter(|&&b| b).count();
        assert!(ones > 64 && ones < 192, "ones = {ones}");
    }

    #[test]
    fn test_flip_random_changes_exactly_one_bit() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let before = random_bitvector(&mut rng, 16);
        let mut after = before.clone();
        let i = flip_random(&mut rng, &mut after).unwrap();
        let diff: Vec<usize> = (0..16).filter(|&j| before[j] != after[j]).collect();
        assert_eq!(diff, vec![i]);
        assert_eq!(flip_random(&mut rng, &mut []), None);
    }
}
