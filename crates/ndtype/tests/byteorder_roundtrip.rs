// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Byte-order transform over randomly generated nested descriptor trees.

use std::sync::Arc;

use ndtype::{
    equiv_types, find_object_flag, is_native, ByteOrder, ByteOrderMode, DescrRef, Descriptor,
    StructBuilder, TypeCode,
};

const LEAF_CODES: [TypeCode; 9] = [
    TypeCode::Bool,
    TypeCode::Byte,
    TypeCode::Short,
    TypeCode::UInt,
    TypeCode::LongLong,
    TypeCode::Float,
    TypeCode::Double,
    TypeCode::CDouble,
    TypeCode::TimeDelta,
];

const ORDERS: [ByteOrder; 3] = [ByteOrder::Native, ByteOrder::Little, ByteOrder::Big];

fn random_leaf(rng: &mut fastrand::Rng) -> DescrRef {
    let code = LEAF_CODES[rng.usize(..LEAF_CODES.len())];
    let mut leaf = Descriptor::new_from_type(code).expect("builtin");
    if leaf.byte_order() != ByteOrder::NotApplicable {
        leaf.set_byte_order(ORDERS[rng.usize(..ORDERS.len())]);
    }
    Arc::new(leaf)
}

fn random_tree(rng: &mut fastrand::Rng, depth: usize) -> DescrRef {
    if depth == 0 || rng.u8(..4) == 0 {
        return random_leaf(rng);
    }

    let mut builder = StructBuilder::new().aligned(rng.bool());
    for i in 0..rng.usize(1..5) {
        let name = format!("f{}", i);
        builder = match rng.u8(..4) {
            0 => builder.titled_field(name, format!("T{}", i), random_tree(rng, depth - 1)),
            1 => builder.array_field(name, LEAF_CODES[rng.usize(..LEAF_CODES.len())], &[2, 2]),
            _ => builder.field_with_descr(name, random_tree(rng, depth - 1)),
        };
    }
    Arc::new(builder.build().expect("valid struct"))
}

/// Resolved byte order of every non-alias node, in traversal order.
fn resolved_orders(d: &Descriptor, out: &mut Vec<ByteOrder>) {
    out.push(d.byte_order().resolve());
    if let Some(layout) = d.layout() {
        for (_, field) in layout.ordered() {
            resolved_orders(&field.descr, out);
        }
    }
    if let Some(sub) = d.subarray() {
        resolved_orders(sub.base(), out);
    }
}

#[test]
fn swap_twice_restores_every_level() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0001);
    for _ in 0..200 {
        let tree = random_tree(&mut rng, 3);
        let once = tree.new_byteorder(ByteOrderMode::Swap).expect("swap");
        let twice = once.new_byteorder(ByteOrderMode::Swap).expect("swap");

        let (mut before, mut after) = (Vec::new(), Vec::new());
        resolved_orders(&tree, &mut before);
        resolved_orders(&twice, &mut after);
        assert_eq!(before, after);
        assert!(equiv_types(&tree, &twice));
        assert_eq!(is_native(&tree), is_native(&twice));
    }
}

#[test]
fn transform_never_alters_input() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0002);
    for _ in 0..100 {
        let tree = random_tree(&mut rng, 3);
        let snapshot = tree.duplicate().expect("copy");
        let count = Arc::strong_count(&tree);

        for mode in [
            ByteOrderMode::Swap,
            ByteOrderMode::Force(ByteOrder::Big),
            ByteOrderMode::Force(ByteOrder::Little),
            ByteOrderMode::Keep,
        ] {
            let _new = tree.new_byteorder(mode).expect("transform");
            assert_eq!(*tree, snapshot);
            assert_eq!(Arc::strong_count(&tree), count);
        }
    }
}

#[test]
fn forced_native_makes_tree_native() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0003);
    for _ in 0..100 {
        let tree = random_tree(&mut rng, 3);
        let native = tree
            .new_byteorder(ByteOrderMode::Force(ByteOrder::Native))
            .expect("force");
        assert!(is_native(&native));

        let foreign = tree
            .new_byteorder(ByteOrderMode::Force(ByteOrder::opposite()))
            .expect("force");
        let mut orders = Vec::new();
        resolved_orders(&foreign, &mut orders);
        let has_multibyte = orders.iter().any(|o| *o != ByteOrder::NotApplicable);
        assert_eq!(is_native(&foreign), !has_multibyte);
    }
}

#[test]
fn keep_preserves_orders_and_object_flags() {
    let with_object = StructBuilder::new()
        .field("n", TypeCode::Int)
        .field("o", TypeCode::Object)
        .build()
        .expect("valid struct");

    let kept = with_object.new_byteorder(ByteOrderMode::Keep).expect("keep");
    assert_eq!(kept, with_object);
    assert!(find_object_flag(&kept));
}
