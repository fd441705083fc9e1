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


use tracing::trace;

use super::probe::get_bit;
use super::ProbeSequence;
use super::MAX_NUM_PROBES;
use crate::error::Error;
use crate::hash::BloomHash;
use crate::hash::KeyHasher;

/// Tests whether a key may be a member of an encoded filter, using the default [`BloomHash`].
///
/// Returns:
/// - `true`: the key was **possibly** inserted (or false positive)
/// - `false`: the key was **definitely not** inserted
///
/// Never fails. Buffers too short to hold a payload and a trailer answer `false`; trailers
/// above 30 are reserved for future encodings and answer `true`.
pub fn key_may_match(key: &[u8], filter: &[u8]) -> bool {
    key_hash_may_match(BloomHash::default().hash(key), filter)
}

/// Like [`key_may_match`], with a key hash computed by the caller.
///
/// The probe count is read from the filter's trailer, not from any local configuration, so
/// filters built with other bits-per-key settings are probed correctly.
pub fn key_hash_may_match(hash: u32, filter: &[u8]) -> bool {
    let Some((&num_probes, bits)) = filter.split_last() else {
        return false;
    };
    if bits.is_empty() {
        return false;
    }
    if num_probes > MAX_NUM_PROBES {
        trace!(num_probes, "reserved bloom filter encoding, treating key as present");
        return true;
    }
    ProbeSequence::new(hash, num_probes, bits.len() * 8)
        .all(|bit_index| get_bit(bits, bit_index))
}

/// An immutable, self-describing bloom filter encoding.
///
/// The layout is the packed bit array followed by a single trailer byte:
///
/// ```text
/// byte[0 .. n-1]   bit array, little-endian bit order within each byte
/// byte[n]          number of probes used to build the filter (0-30; above 30 reserved)
/// ```
///
/// Use [`super::BloomFilterBuilder`] to construct instances, or
/// [`from_bytes`](Self::from_bytes) to wrap bytes read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedFilter {
    /// Bit array plus trailer, never shorter than 2 bytes
    bytes: Vec<u8>,
}

impl EncodedFilter {
    pub(super) fn from_parts(mut bits: Vec<u8>, num_probes: u8) -> Self {
        debug_assert!(!bits.is_empty());
        bits.push(num_probes);
        EncodedFilter { bytes: bits }
    }

    /// Wraps an encoded filter, checking that it holds a payload and a trailer.
    ///
    /// Reserved trailer values are accepted: they are valid encodings from newer writers, and
    /// such filters report every key as possibly present.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is shorter than 2 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kvbloom::bloom::{BloomFilterBuilder, EncodedFilter};
    /// let filter = BloomFilterBuilder::new(10).build();
    /// let restored = EncodedFilter::from_bytes(filter.as_bytes().to_vec()).unwrap();
    /// assert_eq!(filter, restored);
    ///
    /// assert!(EncodedFilter::from_bytes(vec![6]).is_err());
    /// ```
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        if bytes.len() < 2 {
            return Err(Error::insufficient_data("encoded filter")
                .with_context("len", bytes.len()));
        }
        Ok(EncodedFilter { bytes })
    }

    /// Tests whether a key may be a member, using the default [`BloomHash`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use kvbloom::bloom::BloomFilterBuilder;
    /// let mut builder = BloomFilterBuilder::new(10);
    /// builder.add_key(b"apple");
    /// let filter = builder.build();
    ///
    /// assert!(filter.key_may_match(b"apple")); // true - was inserted
    /// ```
    pub fn key_may_match(&self, key: &[u8]) -> bool {
        key_may_match(key, &self.bytes)
    }

    /// Tests whether a key may be a member, hashing it with `hasher`.
    ///
    /// `hasher` must be the hash the filter was built with.
    pub fn key_may_match_with<H: KeyHasher + ?Sized>(&self, key: &[u8], hasher: &H) -> bool {
        key_hash_may_match(hasher.hash_key(key), &self.bytes)
    }

    /// Returns the full encoding, trailer included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the filter and returns the full encoding.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the encoded length in bytes, trailer included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the bit array without the trailer.
    pub fn bit_array(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    /// Returns the number of bits in the bit array (m).
    pub fn num_bits(&self) -> usize {
        self.bit_array().len() * 8
    }

    /// Returns the trailer byte: the number of probes (k) used at build time.
    pub fn num_probes(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }

    /// Returns whether the trailer holds a value reserved for future encodings.
    pub fn is_reserved_encoding(&self) -> bool {
        self.num_probes() > MAX_NUM_PROBES
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_set(&self) -> u64 {
        self.bit_array()
            .iter()
            .map(|byte| u64::from(byte.count_ones()))
            .sum()
    }

    /// Returns the fraction of bits set.
    ///
    /// Values above 0.5 indicate the filter was built with too few bits per key.
    pub fn load_factor(&self) -> f64 {
        self.bits_set() as f64 / self.num_bits() as f64
    }

    /// Estimates the false positive probability from the bits actually set.
    ///
    /// Uses the approximation `load_factor^k`. Reserved encodings match every key, so they
    /// report 1.0.
    pub fn estimated_fpp(&self) -> f64 {
        if self.is_reserved_encoding() {
            return 1.0;
        }
        self.load_factor().powi(i32::from(self.num_probes()))
    }
}

impl AsRef<[u8]> for EncodedFilter {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for EncodedFilter {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        EncodedFilter::from_bytes(bytes)
    }
}

impl From<EncodedFilter> for Vec<u8> {
    fn from(filter: EncodedFilter) -> Self {
        filter.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_short_buffers_never_match() {
        assert!(!key_may_match(b"", &[]));
        assert!(!key_may_match(b"hello", &[]));
        assert!(!key_may_match(b"hello", &[0xff]));
        assert!(!key_hash_may_match(0, &[1]));
    }

    #[test]
    fn test_reserved_trailer_matches_everything() {
        for trailer in [31u8, 32, 128, 255] {
            let mut bytes = vec![0u8; 8];
            bytes.push(trailer);
            assert!(key_may_match(b"hello", &bytes));
            assert!(key_may_match(b"", &bytes));

            let filter = EncodedFilter::from_bytes(bytes).unwrap();
            assert!(filter.is_reserved_encoding());
            assert!(filter.key_may_match(b"anything"));
            assert_eq!(filter.estimated_fpp(), 1.0);
        }
    }

    #[test]
    fn test_zero_probes_matches_everything() {
        let filter = EncodedFilter::from_bytes(vec![0u8; 9]).unwrap();
        assert_eq!(filter.num_probes(), 0);
        assert!(!filter.is_reserved_encoding());
        assert!(filter.key_may_match(b"hello"));
    }

    #[test]
    fn test_all_zero_payload_matches_nothing() {
        let mut bytes = vec![0u8; 8];
        bytes.push(6);
        assert!(!key_may_match(b"hello", &bytes));
        assert!(!key_may_match(b"world", &bytes));
    }

    #[test]
    fn test_all_ones_payload_matches_everything() {
        let mut bytes = vec![0xffu8; 8];
        bytes.push(30);
        assert!(key_may_match(b"hello", &bytes));
        assert!(key_may_match(b"world", &bytes));

        let filter = EncodedFilter::from_bytes(bytes).unwrap();
        assert_eq!(filter.bits_set(), 64);
        assert_eq!(filter.load_factor(), 1.0);
        assert_eq!(filter.estimated_fpp(), 1.0);
    }

    #[test]
    fn test_from_bytes_too_short() {
        for bytes in [vec![], vec![6u8]] {
            let err = EncodedFilter::try_from(bytes).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidData);
        }
        let err = EncodedFilter::from_bytes(vec![6u8]).unwrap_err();
        assert_snapshot!(err, @"InvalidData, context: { len: 1 } => insufficient data: encoded filter");
    }

    #[test]
    fn test_accessors() {
        let filter = EncodedFilter::from_parts(vec![0b0000_0101, 0, 0, 0, 0, 0, 0, 0x80], 6);
        assert_eq!(filter.len(), 9);
        assert_eq!(filter.num_bits(), 64);
        assert_eq!(filter.num_probes(), 6);
        assert_eq!(filter.bit_array().len(), 8);
        assert_eq!(filter.bits_set(), 3);
        assert_eq!(filter.as_ref().last(), Some(&6));

        let bytes: Vec<u8> = filter.clone().into();
        assert_eq!(bytes, filter.into_bytes());
    }
}
