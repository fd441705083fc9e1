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


use tracing::debug;

use super::probe::set_bit;
use super::EncodedFilter;
use super::FilterConfig;
use super::ProbeSequence;
use crate::hash::BloomHash;
use crate::hash::KeyHasher;

/// Builder for a bloom filter over a batch of keys.
///
/// Keys are hashed as they are added; only their 32-bit hashes are buffered until
/// [`build`](Self::build) sizes the filter for the whole batch. Key order and duplicates do not
/// affect the result beyond the key count used for sizing.
///
/// # Examples
///
/// ```
/// # use kvbloom::bloom::BloomFilterBuilder;
/// let mut builder = BloomFilterBuilder::new(10);
/// builder.add_key(b"apple");
/// builder.extend([b"banana".as_slice(), b"cherry".as_slice()]);
/// let filter = builder.build();
///
/// assert!(filter.key_may_match(b"banana"));
/// assert_eq!(filter.num_probes(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder<H = BloomHash> {
    config: FilterConfig,
    hasher: H,
    key_hashes: Vec<u32>,
}

impl BloomFilterBuilder {
    /// Creates a builder spending `bits_per_key` bits on every key, hashing with [`BloomHash`].
    pub fn new(bits_per_key: i32) -> Self {
        Self::with_config(FilterConfig::new(bits_per_key))
    }

    /// Creates a builder from an existing config, hashing with [`BloomHash`].
    pub fn with_config(config: FilterConfig) -> Self {
        BloomFilterBuilder {
            config,
            hasher: BloomHash::default(),
            key_hashes: vec![],
        }
    }
}

impl<H: KeyHasher> BloomFilterBuilder<H> {
    /// Replaces the key hash.
    ///
    /// **Important**: filters can only be probed with the hash they were built with.
    ///
    /// # Panics
    ///
    /// Panics if keys were already added with the previous hash.
    pub fn hasher<H2: KeyHasher>(self, hasher: H2) -> BloomFilterBuilder<H2> {
        assert!(
            self.key_hashes.is_empty(),
            "hasher must be set before adding keys"
        );
        BloomFilterBuilder {
            config: self.config,
            hasher,
            key_hashes: self.key_hashes,
        }
    }

    /// Returns the config filters are built with.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Returns the number of keys added so far.
    pub fn num_keys(&self) -> usize {
        self.key_hashes.len()
    }

    /// Adds a key to the batch.
    pub fn add_key(&mut self, key: &[u8]) {
        self.key_hashes.push(self.hasher.hash_key(key));
    }

    /// Builds the encoded filter for every key added so far.
    ///
    /// An empty batch still produces a minimum-size filter, which matches no key.
    pub fn build(self) -> EncodedFilter {
        let num_bits = self.config.num_bits(self.key_hashes.len());
        let num_probes = self.config.num_probes();

        let mut bits = vec![0u8; num_bits / 8];
        for &hash in &self.key_hashes {
            for bit_index in ProbeSequence::new(hash, num_probes, num_bits) {
                set_bit(&mut bits, bit_index);
            }
        }

        debug!(
            num_keys = self.key_hashes.len(),
            num_bits, num_probes, "built bloom filter"
        );
        EncodedFilter::from_parts(bits, num_probes)
    }
}

impl<H: KeyHasher, K: AsRef<[u8]>> Extend<K> for BloomFilterBuilder<H> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        let keys = keys.into_iter();
        self.key_hashes.reserve(keys.size_hint().0);
        for key in keys {
            self.add_key(key.as_ref());
        }
    }
}
