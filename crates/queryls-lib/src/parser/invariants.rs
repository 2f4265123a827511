//! Parser self-checks. A failure here is a parser bug, never bad input.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::cell::Cell;

use super::core::Parser;
use super::cst::SyntaxKind;

/// Lookaheads allowed between two consumed tokens.
const LOOKAHEAD_BUDGET: u32 = 256;

/// Counts lookaheads since the parser last consumed a token or changed depth.
#[derive(Debug)]
pub(super) struct Stall(Cell<u32>);

impl Stall {
    pub(super) fn new() -> Self {
        Self(Cell::new(LOOKAHEAD_BUDGET))
    }

    pub(super) fn tick(&self) {
        let left = self.0.get();
        assert!(
            left != 0,
            "parser made no progress after {LOOKAHEAD_BUDGET} lookaheads"
        );
        self.0.set(left - 1);
    }

    pub(super) fn reset(&self) {
        self.0.set(LOOKAHEAD_BUDGET);
    }
}

impl Parser<'_> {
    /// Grammar routines that consume their first token unchecked state it here.
    #[inline]
    pub(super) fn debug_expect(&mut self, kind: SyntaxKind) {
        let found = self.current();
        debug_assert_eq!(
            found, kind,
            "grammar routine entered at {found:?}, wants {kind:?}"
        );
    }
}
