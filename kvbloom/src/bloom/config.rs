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


use std::f64::consts::LN_2;

use super::MAX_NUM_PROBES;
use super::MIN_FILTER_BITS;

/// Bits per key used by [`FilterConfig::default`], about 1% false positives.
pub const DEFAULT_BITS_PER_KEY: i32 = 10;

/// Per-filter sizing policy.
///
/// `bits_per_key` is the space budget for every key in a batch; the number of probes is derived
/// from it as `floor(bits_per_key * ln(2))`, clamped to `[1, 30]`, which approximately minimizes
/// the false positive rate for that budget. Rounding down trades a little accuracy for cheaper
/// probing.
///
/// The config only governs construction. Encoded filters record their probe count, so they can
/// be probed without it.
///
/// # Examples
///
/// ```
/// # use kvbloom::bloom::FilterConfig;
/// let config = FilterConfig::new(10);
/// assert_eq!(config.bits_per_key(), 10);
/// assert_eq!(config.num_probes(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterConfig {
    bits_per_key: i32,
    num_probes: u8,
}

impl FilterConfig {
    /// Creates a config with the given space budget.
    ///
    /// Degenerate budgets (zero or negative) still produce a usable config with a single probe;
    /// filters built from it fall back to the minimum filter size.
    pub fn new(bits_per_key: i32) -> Self {
        // Negative products saturate to 0 on the float to int cast.
        let num_probes = (f64::from(bits_per_key) * LN_2) as u32;
        let num_probes = num_probes.clamp(1, u32::from(MAX_NUM_PROBES)) as u8;
        FilterConfig {
            bits_per_key,
            num_probes,
        }
    }

    /// Returns the configured bits per key.
    pub fn bits_per_key(&self) -> i32 {
        self.bits_per_key
    }

    /// Returns the number of probes (k) written into filters built with this config.
    pub fn num_probes(&self) -> u8 {
        self.num_probes
    }

    /// Returns the payload size in bits of a filter holding `num_keys` keys.
    ///
    /// This is `num_keys * bits_per_key`, raised to at least 64 bits and rounded up to a whole
    /// number of bytes. Small batches would otherwise see very high false positive rates.
    ///
    /// ```
    /// # use kvbloom::bloom::FilterConfig;
    /// let config = FilterConfig::new(10);
    /// assert_eq!(config.num_bits(0), 64);
    /// assert_eq!(config.num_bits(7), 72);
    /// assert_eq!(config.num_bits(1000), 10_000);
    /// ```
    pub fn num_bits(&self, num_keys: usize) -> usize {
        let bits_per_key = usize::try_from(self.bits_per_key).unwrap_or(0);
        let bits = num_keys.saturating_mul(bits_per_key).max(MIN_FILTER_BITS);
        bits.div_ceil(8).saturating_mul(8)
    }

    /// Returns the theoretical false positive probability of a filter holding `num_keys` keys.
    ///
    /// Formula: `(1 - e^(-k * n / m))^k`
    /// where k = num_probes, n = num_keys, m = [`num_bits`](Self::num_bits)
    pub fn expected_fpp(&self, num_keys: usize) -> f64 {
        let k = f64::from(self.num_probes);
        let n = num_keys as f64;
        let m = self.num_bits(num_keys) as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Suggests a bits-per-key budget for a target false positive probability.
    ///
    /// Formula: `bits_per_key = ceil(-ln(p) / ln(2)^2)`
    ///
    /// # Panics
    ///
    /// Panics if `fpp` is not in `(0.0, 1.0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kvbloom::bloom::FilterConfig;
    /// assert_eq!(FilterConfig::suggest_bits_per_key(0.01), 10);
    /// assert_eq!(FilterConfig::suggest_bits_per_key(1.0), 0);
    /// ```
    pub fn suggest_bits_per_key(fpp: f64) -> i32 {
        assert!(
            fpp > 0.0 && fpp <= 1.0,
            "fpp must be between 0.0 and 1.0 (inclusive of 1.0)"
        );
        let bits = (-fpp.ln() / (LN_2 * LN_2)).ceil();
        bits.clamp(0.0, f64::from(i32::MAX)) as i32
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig::new(DEFAULT_BITS_PER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_probes() {
        assert_eq!(FilterConfig::new(1).num_probes(), 1);
        assert_eq!(FilterConfig::new(2).num_probes(), 1);
        assert_eq!(FilterConfig::new(3).num_probes(), 2);
        assert_eq!(FilterConfig::new(10).num_probes(), 6);
        assert_eq!(FilterConfig::new(13).num_probes(), 9);
        assert_eq!(FilterConfig::new(20).num_probes(), 13);
        assert_eq!(FilterConfig::new(43).num_probes(), 29);
        assert_eq!(FilterConfig::new(44).num_probes(), 30);
        assert_eq!(FilterConfig::new(1000).num_probes(), 30);
        assert_eq!(FilterConfig::new(i32::MAX).num_probes(), 30);
    }

    #[test]
    fn test_degenerate_bits_per_key() {
        for bits_per_key in [0, -1, -100, i32::MIN] {
            let config = FilterConfig::new(bits_per_key);
            assert_eq!(config.num_probes(), 1);
            assert_eq!(config.num_bits(0), 64);
            assert_eq!(config.num_bits(1_000_000), 64);
        }
    }

    #[test]
    fn test_default() {
        let config = FilterConfig::default();
        assert_eq!(config.bits_per_key(), DEFAULT_BITS_PER_KEY);
        assert_eq!(config.num_probes(), 6);
    }

    #[test]
    fn test_num_bits_rounding() {
        let config = FilterConfig::new(3);
        assert_eq!(config.num_bits(1), 64);
        assert_eq!(config.num_bits(21), 64);
        assert_eq!(config.num_bits(22), 72);
        assert_eq!(config.num_bits(24), 72);
        assert_eq!(config.num_bits(25), 80);
    }

    #[test]
    fn test_expected_fpp() {
        let config = FilterConfig::new(10);
        assert_eq!(config.expected_fpp(0), 0.0);
        let fpp = config.expected_fpp(1000);
        assert!(fpp > 0.005 && fpp < 0.01, "fpp = {fpp}");
        assert!(FilterConfig::new(20).expected_fpp(1000) < fpp);
    }

    #[test]
    fn test_suggest_bits_per_key() {
        assert_eq!(FilterConfig::suggest_bits_per_key(0.1), 5);
        assert_eq!(FilterConfig::suggest_bits_per_key(0.01), 10);
        assert_eq!(FilterConfig::suggest_bits_per_key(0.001), 15);
    }

    #[test]
    #[should_panic(expected = "fpp must be between 0.0 and 1.0")]
    fn test_suggest_bits_per_key_zero_fpp() {
        FilterConfig::suggest_bits_per_key(0.0);
    }
}
