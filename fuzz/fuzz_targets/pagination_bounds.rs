// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for pagination arithmetic.
//!
//! Page numbers come from URLs and key presses; page sizes from config. Any of
//! them can be 0 or `usize::MAX`, and none of them may panic or overflow.

#![no_main]

use arbitrary::Arbitrary;
use docsift::testing::make_results;
use docsift::{paginate, total_pages, Paginator};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Move {
    Next,
    Prev,
    GoTo(usize),
}

#[derive(Arbitrary, Debug)]
struct Input {
    len: u8,
    page_number: usize,
    page_size: usize,
    moves: Vec<Move>,
}

fuzz_target!(|input: Input| {
    let results = make_results(input.len as usize);

    let slice = paginate(&results, input.page_number, input.page_size);
    assert!(slice.len() <= input.page_size);
    assert!(total_pages(results.len(), input.page_size) >= 1);

    let Ok(mut paginator) = Paginator::new(results, input.page_size) else {
        assert_eq!(input.page_size, 0);
        return;
    };
    let last = paginator.total_pages();
    for m in input.moves.into_iter().take(64) {
        let page = match m {
            Move::Next => paginator.next_page(),
            Move::Prev => paginator.prev_page(),
            Move::GoTo(n) => paginator.go_to(n),
        };
        assert!((1..=last).contains(&page));
        assert!(paginator.page().items.len() <= input.page_size);
    }
});
