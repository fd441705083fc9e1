// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


use std::iter::FusedIterator;

/// The bit positions a key touches, generated by double hashing.
///
/// See analysis in Kirsch and Mitzenmacher, "Less Hashing, Same Performance: Building a Better
/// Bloom Filter" (2006). The second hash is the first one rotated right by 17 bits; each probe
/// is `h mod bits` and `h` then advances by that delta with 32-bit wrapping. Every constant
/// here is part of the encoding, so filters stay readable across builds.
///
/// ```
/// # use kvbloom::bloom::ProbeSequence;
/// let positions: Vec<usize> = ProbeSequence::new(0x0001_0000, 3, 64).collect();
/// assert_eq!(positions, vec![0, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    hash: u32,
    delta: u32,
    remaining: u8,
    num_bits: usize,
}

impl ProbeSequence {
    /// Creates the sequence of `num_probes` positions in `[0, num_bits)` for a key hash.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` is zero.
    pub fn new(hash: u32, num_probes: u8, num_bits: usize) -> Self {
        assert!(num_bits > 0, "num_bits must be at least 1");
        ProbeSequence {
            hash,
            delta: hash.rotate_right(17),
            remaining: num_probes,
            num_bits,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let bit_index = self.hash as usize % self.num_bits;
        self.hash = self.hash.wrapping_add(self.delta);
        Some(bit_index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

impl FusedIterator for ProbeSequence {}

/// Sets a single bit, little-endian bit order within each byte.
pub(super) fn set_bit(bits: &mut [u8], bit_index: usize) {
    bits[bit_index / 8] |= 1 << (bit_index % 8);
}

/// Gets the value of a single bit.
pub(super) fn get_bit(bits: &[u8], bit_index: usize) -> bool {
    bits[bit_index / 8] & (1 << (bit_index % 8)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_is_right_by_17() {
        let h: u32 = 0xf795964e;
        let seq = ProbeSequence::new(h, 1, 64);
        assert_eq!(seq.delta, (h >> 17) | (h << 15));
    }

    #[test]
    fn test_positions() {
        let h: u32 = 0xf795964e;
        let delta = h.rotate_right(17);
        let expected: Vec<usize> = (0..6u32)
            .map(|j| (h.wrapping_add(delta.wrapping_mul(j)) % 1000) as usize)
            .collect();
        let positions: Vec<usize> = ProbeSequence::new(h, 6, 1000).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_wrapping() {
        let seq = ProbeSequence::new(u32::MAX, 30, 1 << 20);
        assert_eq!(seq.len(), 30);
        assert!(seq.clone().all(|bit_index| bit_index < 1 << 20));
        assert_eq!(seq.count(), 30);
    }

    #[test]
    fn test_zero_probes() {
        let mut seq = ProbeSequence::new(12345, 0, 64);
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.next(), None);
        assert_eq!(seq.next(), None);
    }

    #[test]
    #[should_panic(expected = "num_bits must be at least 1")]
    fn test_zero_bits() {
        ProbeSequence::new(1, 1, 0);
    }

    #[test]
    fn test_bit_order() {
        let mut bits = [0u8; 2];
        set_bit(&mut bits, 0);
        set_bit(&mut bits, 9);
        assert_eq!(bits, [0b0000_0001, 0b0000_0010]);
        assert!(get_bit(&bits, 0));
        assert!(get_bit(&bits, 9));
        assert!(!get_bit(&bits, 1));
        assert!(!get_bit(&bits, 8));
    }
}
