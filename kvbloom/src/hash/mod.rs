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


//! Key hashing for bloom filters.
//!
//! Builders and probers only ever see a key through its 32-bit hash, so any deterministic,
//! uniformly-distributing function can be plugged in through [`KeyHasher`]. Swapping the hash
//! changes false positive statistics but never the encoding scheme. Filters must be probed with
//! the same hash they were built with.

mod bloomhash;

pub use self::bloomhash::BloomHash;

/// The seed of the default [`BloomHash`].
///
/// Filters persisted by one process are probed by others, so the seed is part of the on-disk
/// contract and must never change.
pub const BLOOM_HASH_SEED: u32 = 0xbc9f1d34;

/// Maps a key to the 32-bit hash that drives its probe sequence.
///
/// Any `Fn(&[u8]) -> u32` is a `KeyHasher`:
///
/// ```
/// # use kvbloom::hash::KeyHasher;
/// let fnv = |key: &[u8]| {
///     key.iter()
///         .fold(2166136261u32, |h, &b| (h ^ u32::from(b)).wrapping_mul(16777619))
/// };
/// assert_eq!(fnv.hash_key(b""), 2166136261);
/// ```
pub trait KeyHasher {
    /// Hashes `key` to 32 bits.
    fn hash_key(&self, key: &[u8]) -> u32;
}

impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> u32,
{
    fn hash_key(&self, key: &[u8]) -> u32 {
        self(key)
    }
}
