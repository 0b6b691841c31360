// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use ndtype::{ByteOrderMode, Descriptor};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must render and parse back to the same type
    if let Ok(descr) = Descriptor::from_typestr(text) {
        let rendered = descr.to_string();
        let reparsed = Descriptor::from_typestr(&rendered).expect("rendered typestr parses");
        assert_eq!(reparsed.type_code(), descr.type_code());
        assert_eq!(reparsed.elem_size(), descr.elem_size());

        let _ = descr.new_byteorder(ByteOrderMode::Swap);
    }
});
