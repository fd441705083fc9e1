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


use kvbloom::bloom::BloomFilterBuilder;
use kvbloom::bloom::BloomFilterPolicy;
use kvbloom::bloom::EncodedFilter;
use kvbloom::bloom::FilterConfig;
use kvbloom::bloom::FilterPolicy;

fn main() {
    // 10 bits per key gives 6 probes and ~1% false positives
    let config = FilterConfig::new(10);
    println!(
        "bits_per_key={} num_probes={}",
        config.bits_per_key(),
        config.num_probes()
    );

    println!("\nBuilding a filter over 10,000 keys...");
    let mut builder = BloomFilterBuilder::with_config(config);
    for i in 0..10_000 {
        builder.add_key(format!("key:{i}").as_bytes());
    }
    let filter = builder.build();
    println!("Encoded size: {} bytes", filter.len());
    println!("Load factor: {:.3}", filter.load_factor());
    println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
    println!("Expected FPP: {:.4}%", config.expected_fpp(10_000) * 100.0);

    // Measure false positives on keys that were never added
    let false_positives = (10_000..20_000)
        .filter(|i| filter.key_may_match(format!("key:{i}").as_bytes()))
        .count();
    println!(
        "Observed FPP: {:.4}%",
        false_positives as f64 / 10_000.0 * 100.0
    );

    // Round-trip through raw bytes, as a store would
    println!("\nReloading the filter from bytes...");
    let bytes = filter.into_bytes();
    let filter = EncodedFilter::from_bytes(bytes).unwrap();
    println!("key:42 may match: {}", filter.key_may_match(b"key:42"));

    // Filters remember their probe count
    println!("\nProbing with a policy configured for 4 bits per key:");
    let policy = BloomFilterPolicy::new(4);
    println!(
        "{}: key:42 may match: {}",
        policy.name(),
        policy.key_may_match(b"key:42", filter.as_bytes())
    );
}
