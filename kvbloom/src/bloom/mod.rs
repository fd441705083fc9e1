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


//! Bloom filters for skipping key-value store lookups.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! a key is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! Filters here are built once from a batch of keys known in advance (for example, every key of
//! an immutable table file), stored next to the data, and probed before each lookup.
//!
//! # Properties
//!
//! - **No false negatives**: every key of the batch makes `key_may_match()` return `true`
//! - **Possible false positives**: `key_may_match()` may return `true` for other keys
//! - **Immutable**: no insertion, deletion or resizing after construction
//! - **Self-describing**: the encoding records its own probe count
//!
//! # Usage
//!
//! ```rust
//! use kvbloom::bloom::BloomFilterBuilder;
//! use kvbloom::bloom::EncodedFilter;
//!
//! // Spend 10 bits on every key, about 1% false positives
//! let mut builder = BloomFilterBuilder::new(10);
//! for key in ["apple", "banana", "cherry"] {
//!     builder.add_key(key.as_bytes());
//! }
//! let filter = builder.build();
//!
//! // Persist the raw bytes...
//! let bytes = filter.into_bytes();
//!
//! // ...and probe them later
//! assert!(kvbloom::bloom::key_may_match(b"apple", &bytes));
//!
//! let filter = EncodedFilter::from_bytes(bytes).unwrap();
//! assert!(filter.key_may_match(b"banana"));
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! ```
//!
//! # Encoding
//!
//! ```text
//! byte[0 .. n-1]   bit array, little-endian bit order within each byte
//! byte[n]          trailer: number of probes k (0-30; above 30 reserved)
//! ```
//!
//! The bit array holds `max(64, num_keys * bits_per_key)` bits rounded up to whole bytes.
//! Probers derive its size from the buffer length and read `k` from the trailer, so filters
//! built with any bits-per-key setting are probed correctly. Buffers shorter than 2 bytes match
//! nothing; reserved trailers match everything, so newer encodings never yield false negatives.
//!
//! # Implementation Details
//!
//! - Keys are hashed to 32 bits with [`BloomHash`](crate::hash::BloomHash) unless another
//!   [`KeyHasher`](crate::hash::KeyHasher) is supplied
//! - Double hashing (Kirsch-Mitzenmacher method) derives the k probes, see [`ProbeSequence`]

mod builder;
mod config;
mod filter;
mod policy;
mod probe;

pub use self::builder::BloomFilterBuilder;
pub use self::config::FilterConfig;
pub use self::config::DEFAULT_BITS_PER_KEY;
pub use self::filter::key_hash_may_match;
pub use self::filter::key_may_match;
pub use self::filter::EncodedFilter;
pub use self::policy::BloomFilterPolicy;
pub use self::policy::FilterPolicy;
pub use self::probe::ProbeSequence;

/// Largest probe count; higher trailer values are reserved for future encodings.
pub const MAX_NUM_PROBES: u8 = 30;

/// Smallest bit array, in bits.
pub const MIN_FILTER_BITS: usize = 64;
