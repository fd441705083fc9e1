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


use byteorder::ByteOrder;
use byteorder::LE;

use super::KeyHasher;
use super::BLOOM_HASH_SEED;

const M: u32 = 0xc6a4a793;
const R: u32 = 24;

/// The 32-bit hash used by LevelDB-family stores for their bloom filters.
///
/// A simplified Murmur-style mix over little-endian 4-byte words. It is not cryptographic and
/// should only be used for filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloomHash {
    seed: u32,
}

impl BloomHash {
    /// Creates the hash with a custom seed.
    ///
    /// Filters built with one seed can not be probed with another.
    pub const fn with_seed(seed: u32) -> Self {
        BloomHash { seed }
    }

    /// Returns the seed.
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Hashes `data`.
    pub fn hash(&self, data: &[u8]) -> u32 {
        // Length is mixed in as a 32-bit value, longer keys simply wrap.
        let mut h = self.seed ^ (data.len() as u32).wrapping_mul(M);

        let mut words = data.chunks_exact(4);
        for word in &mut words {
            h = h.wrapping_add(LE::read_u32(word));
            h = h.wrapping_mul(M);
            h ^= h >> 16;
        }

        let rem = words.remainder();
        if !rem.is_empty() {
            let mut buf = [0u8; 4];
            buf[..rem.len()].copy_from_slice(rem);
            h = h.wrapping_add(LE::read_u32(&buf));
            h = h.wrapping_mul(M);
            h ^= h >> R;
        }
        h
    }
}

impl Default for BloomHash {
    fn default() -> Self {
        Self::with_seed(BLOOM_HASH_SEED)
    }
}

impl KeyHasher for BloomHash {
    fn hash_key(&self, key: &[u8]) -> u32 {
        self.hash(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answers() {
        let hasher = BloomHash::default();
        assert_eq!(hasher.hash(&[]), 0xbc9f1d34);
        assert_eq!(hasher.hash(&[0x62]), 0xef1345c4);
        assert_eq!(hasher.hash(&[0xc3, 0x97]), 0x5b663814);
        assert_eq!(hasher.hash(&[0xe2, 0x99, 0xa5]), 0x323c078f);
        assert_eq!(hasher.hash(&[0xe1, 0x80, 0xb9, 0x32]), 0xed21633a);
        assert_eq!(hasher.hash(b"hello"), 0xf795964e);
        assert_eq!(hasher.hash(b"world"), 0x42c4e8fc);
    }

    #[test]
    fn test_seed() {
        let hasher = BloomHash::with_seed(0);
        assert_eq!(hasher.seed(), 0);
        assert_eq!(hasher.hash(&[]), 0);
        assert_ne!(hasher.hash(b"hello"), BloomHash::default().hash(b"hello"));
    }

    #[test]
    fn test_key_hasher() {
        let hasher = BloomHash::default();
        assert_eq!(hasher.hash_key(b"hello"), hasher.hash(b"hello"));
    }
}
