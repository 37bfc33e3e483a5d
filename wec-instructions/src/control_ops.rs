// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Control-flow building blocks shared with the execution engine.
//!
//! Structured control flow is driven by the engine's control stack; this
//! module holds the pure pieces: the block-kind classification that decides
//! where a branch lands and how many values it carries, and the `br_table`
//! target selection rule.
//!
//! A branch to a `block` or `if` jumps forward past the construct's end and
//! carries the construct's result values. A branch to a `loop` jumps back to
//! the loop head and carries nothing, whatever the loop's result type is;
//! the loop body produces its results only by falling off the end.

/// The kind of a structured control construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A `block`: branches target its end
    Block,
    /// A `loop`: branches target its start
    Loop,
    /// An `if`/`else`: branches target its end, like a block
    If,
}

impl BlockKind {
    /// Number of values a branch targeting this construct transfers, given
    /// the construct's result arity.
    #[must_use]
    pub fn label_arity(self, result_arity: usize) -> usize {
        match self {
            BlockKind::Block | BlockKind::If => result_arity,
            BlockKind::Loop => 0,
        }
    }

    /// Whether a branch to this construct re-enters it instead of exiting.
    #[must_use]
    pub fn branches_to_start(self) -> bool {
        matches!(self, BlockKind::Loop)
    }
}

/// `br_table` target selection.
///
/// The index operand is an i32 reinterpreted as unsigned; any index at or
/// past the target list length selects the default label. There is no trap
/// for a large index.
#[must_use]
pub fn br_table_select(targets: &[u32], default: u32, index: i32) -> u32 {
    let index = index as u32 as usize;
    targets.get(index).copied().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn loop_labels_carry_no_values() {
        assert_eq!(BlockKind::Loop.label_arity(1), 0);
        assert_eq!(BlockKind::Block.label_arity(1), 1);
        assert_eq!(BlockKind::If.label_arity(1), 1);
        assert!(BlockKind::Loop.branches_to_start());
        assert!(!BlockKind::Block.branches_to_start());
    }

    #[test]
    fn br_table_in_range_picks_the_entry() {
        let targets = [4, 5, 6];
        assert_eq!(br_table_select(&targets, 9, 0), 4);
        assert_eq!(br_table_select(&targets, 9, 2), 6);
    }

    #[test]
    fn br_table_out_of_range_picks_default() {
        let targets = [4, 5, 6];
        assert_eq!(br_table_select(&targets, 9, 3), 9);
        assert_eq!(br_table_select(&targets, 9, i32::MAX), 9);
        // negative indices are huge unsigned values
        assert_eq!(br_table_select(&targets, 9, -1), 9);
    }

    #[test]
    fn br_table_empty_targets_always_default() {
        assert_eq!(br_table_select(&[], 2, 0), 2);
    }

    proptest! {
        #[test]
        fn br_table_selection_is_total(targets in prop::collection::vec(any::<u32>(), 0..8),
                                       default in any::<u32>(),
                                       index in any::<i32>()) {
            let selected = br_table_select(&targets, default, index);
            let unsigned = index as u32 as usize;
            if unsigned < targets.len() {
                prop_assert_eq!(selected, targets[unsigned]);
            } else {
                prop_assert_eq!(selected, default);
            }
        }
    }
}
