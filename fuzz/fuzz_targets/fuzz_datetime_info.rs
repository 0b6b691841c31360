// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use ndtype::DateTimeInfo;

fuzz_target!(|input: (u8, i32, i32, i32)| {
    let (unit, num, den, events) = input;
    let units = ["Y", "M", "W", "B", "D", "h", "m", "s", "ms", "us", "ns", "ps", "fs", "as"];
    let name = units.get(unit as usize % (units.len() + 1)).copied();

    // Refinement never leaves a fractional interval behind
    if let Ok(info) = DateTimeInfo::new(name, num, den, events) {
        assert_eq!(info.den, 1);
        assert_eq!(info.events, events);
    }
});
