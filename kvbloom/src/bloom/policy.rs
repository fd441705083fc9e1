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


use super::filter::key_hash_may_match;
use super::BloomFilterBuilder;
use super::EncodedFilter;
use super::FilterConfig;
use crate::hash::BloomHash;
use crate::hash::KeyHasher;

/// A filter scheme a key-value store keeps per table to skip lookups for absent keys.
///
/// Policies are shared across threads and stored as trait objects, so every method takes the
/// keys and encoded filters as plain byte slices.
pub trait FilterPolicy: Send + Sync {
    /// Returns the name of this policy.
    ///
    /// Persisted alongside filters; a store must not probe a filter with a policy of another
    /// name.
    fn name(&self) -> &'static str;

    /// Builds a filter for a batch of keys.
    fn create_filter(&self, keys: &[&[u8]]) -> EncodedFilter;

    /// Returns `false` only if `key` was definitely not in the batch `filter` was built from.
    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool;
}

/// The bloom filter [`FilterPolicy`].
///
/// The config only sizes new filters. Probing reads the probe count from each filter's trailer,
/// so a store can change `bits_per_key` without rebuilding the filters it already wrote.
///
/// # Examples
///
/// ```
/// # use kvbloom::bloom::{BloomFilterPolicy, FilterPolicy};
/// let old = BloomFilterPolicy::new(20);
/// let filter = old.create_filter(&[b"apple", b"banana"]);
///
/// let new = BloomFilterPolicy::new(5);
/// assert!(new.key_may_match(b"apple", filter.as_bytes()));
/// assert!(new.key_may_match(b"banana", filter.as_bytes()));
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilterPolicy<H = BloomHash> {
    config: FilterConfig,
    hasher: H,
}

impl BloomFilterPolicy {
    /// Creates a policy spending `bits_per_key` bits on every key, hashing with [`BloomHash`].
    pub fn new(bits_per_key: i32) -> Self {
        Self::with_hasher(FilterConfig::new(bits_per_key), BloomHash::default())
    }
}

impl Default for BloomFilterPolicy {
    fn default() -> Self {
        Self::with_hasher(FilterConfig::default(), BloomHash::default())
    }
}

impl<H: KeyHasher> BloomFilterPolicy<H> {
    /// Creates a policy with a custom key hash.
    pub fn with_hasher(config: FilterConfig, hasher: H) -> Self {
        BloomFilterPolicy { config, hasher }
    }

    /// Returns the config new filters are built with.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

impl<H: KeyHasher + Clone> BloomFilterPolicy<H> {
    /// Returns a builder for a batch of keys added one at a time.
    pub fn builder(&self) -> BloomFilterBuilder<H> {
        BloomFilterBuilder::with_config(self.config).hasher(self.hasher.clone())
    }
}

impl<H> FilterPolicy for BloomFilterPolicy<H>
where
    H: KeyHasher + Clone + Send + Sync,
{
    fn name(&self) -> &'static str {
        "kvbloom.BloomFilter"
    }

    fn create_filter(&self, keys: &[&[u8]]) -> EncodedFilter {
        let mut builder = self.builder();
        builder.extend(keys);
        builder.build()
    }

    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool {
        key_hash_may_match(self.hasher.hash_key(key), filter)
    }
}
