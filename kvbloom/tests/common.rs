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


/// Encodes `i` as a 4-byte little-endian key.
pub fn int_key(i: u32) -> [u8; 4] {
    i.to_le_bytes()
}

/// Keys that were never inserted by tests building filters from `int_key(0..n)`.
#[allow(dead_code)] // false-positive
pub fn absent_int_keys(count: u32) -> impl Iterator<Item = [u8; 4]> {
    (0..count).map(|i| int_key(i + 1_000_000_000))
}

/// Fraction of `probes` reported as possibly present by `may_match`.
#[allow(dead_code)] // false-positive
pub fn false_positive_rate<K, I>(probes: I, may_match: impl Fn(&[u8]) -> bool) -> f64
where
    K: AsRef<[u8]>,
    I: IntoIterator<Item = K>,
{
    let mut total = 0usize;
    let mut matched = 0usize;
    for key in probes {
        total += 1;
        if may_match(key.as_ref()) {
            matched += 1;
        }
    }
    matched as f64 / total as f64
}
