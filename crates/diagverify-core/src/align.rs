//! Minimum-cost sequence alignment.
//!
//! Wagner–Fischer edit distance with a full backtrace. Costs: `Delete` 1,
//! `Add` 1, `Modify` 1, `Keep` 0. On exact cost ties the cell keeps
//! `Keep`/`Modify` over `Add`, and `Add` over `Delete`; the verification
//! output depends on this order, so it must not change.

use serde::Serialize;
use std::fmt;

/// One step of an edit script transforming the truth sequence into the received one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOp {
    /// Truth element with no received counterpart.
    Delete,
    /// Received element with no truth counterpart.
    Add,
    /// Unequal pair.
    Modify,
    /// Equal pair.
    Keep,
}

impl EditOp {
    pub fn cost(self) -> usize {
        match self {
            EditOp::Keep => 0,
            EditOp::Delete | EditOp::Add | EditOp::Modify => 1,
        }
    }

    /// (truth, received) elements consumed by this op.
    pub fn consumes(self) -> (usize, usize) {
        match self {
            EditOp::Delete => (1, 0),
            EditOp::Add => (0, 1),
            EditOp::Modify | EditOp::Keep => (1, 1),
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Delete => write!(f, "DELETE"),
            EditOp::Add => write!(f, "ADD"),
            EditOp::Modify => write!(f, "MODIFY"),
            EditOp::Keep => write!(f, "KEEP"),
        }
    }
}

/// Per-op tallies of an edit script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpCounts {
    pub delete: usize,
    pub add: usize,
    pub modify: usize,
    pub keep: usize,
}

/// Result of [`align`].
///
/// Ops are stored in backtrace order, from the end of both sequences back to
/// the start. Use [`EditScript::chronological`] to replay front to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditScript {
    ops: Vec<EditOp>,
}

impl EditScript {
    /// Ops as produced by the backtrace (end to start).
    pub fn backtrace(&self) -> &[EditOp] {
        &self.ops
    }

    /// Ops from the start of both sequences to the end.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = EditOp> + '_ {
        self.ops.iter().rev().copied()
    }

    pub fn cost(&self) -> usize {
        self.ops.iter().map(|op| op.cost()).sum()
    }

    pub fn counts(&self) -> OpCounts {
        let mut counts = OpCounts::default();
        for op in &self.ops {
            match op {
                EditOp::Delete => counts.delete += 1,
                EditOp::Add => counts.add += 1,
                EditOp::Modify => counts.modify += 1,
                EditOp::Keep => counts.keep += 1,
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Row-major `(n + 1) x (m + 1)` table.
struct Grid<T> {
    width: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            width: cols,
            cells: vec![fill; rows * cols],
        }
    }

    fn get(&self, i: usize, j: usize) -> T {
        self.cells[i * self.width + j]
    }

    fn set(&mut self, i: usize, j: usize, value: T) {
        self.cells[i * self.width + j] = value;
    }
}

/// Compute the minimum-cost edit script turning `truth` into `received`.
///
/// Runs in O(n·m) time and space. Total for all finite inputs: an empty side
/// degenerates to all `Add` or all `Delete`.
pub fn align<A, B, F>(truth: &[A], received: &[B], mut eq: F) -> EditScript
where
    F: FnMut(&A, &B) -> bool,
{
    let n = truth.len();
    let m = received.len();
    let mut cost = Grid::new(n + 1, m + 1, 0usize);
    let mut op = Grid::new(n + 1, m + 1, EditOp::Keep);

    for i in 1..=n {
        cost.set(i, 0, i);
        op.set(i, 0, EditOp::Delete);
    }
    for j in 1..=m {
        cost.set(0, j, j);
        op.set(0, j, EditOp::Add);
    }

    for i in 1..=n {
        for j in 1..=m {
            let (mut best, mut best_op) = if eq(&truth[i - 1], &received[j - 1]) {
                (cost.get(i - 1, j - 1), EditOp::Keep)
            } else {
                (cost.get(i - 1, j - 1) + 1, EditOp::Modify)
            };

            // Strictly smaller only: ties stay with the earlier candidate.
            let add_cost = cost.get(i, j - 1) + 1;
            if add_cost < best {
                best = add_cost;
                best_op = EditOp::Add;
            }
            let delete_cost = cost.get(i - 1, j) + 1;
            if delete_cost < best {
                best = delete_cost;
                best_op = EditOp::Delete;
            }

            cost.set(i, j, best);
            op.set(i, j, best_op);
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let step = op.get(i, j);
        ops.push(step);
        let (di, dj) = step.consumes();
        i -= di;
        j -= dj;
    }

    EditScript { ops }
}

/// Cost-only edit distance with a single rolling row over the shorter side.
///
/// Agrees with [`EditScript::cost`] for the same inputs.
pub fn edit_distance<A, B, F>(truth: &[A], received: &[B], mut eq: F) -> usize
where
    F: FnMut(&A, &B) -> bool,
{
    if received.len() <= truth.len() {
        rolling_distance(truth, received, &mut eq)
    } else {
        rolling_distance(received, truth, &mut |b: &B, a: &A| eq(a, b))
    }
}

fn rolling_distance<L, S, F>(long: &[L], short: &[S], eq: &mut F) -> usize
where
    F: FnMut(&L, &S) -> bool,
{
    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, l) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, s) in short.iter().enumerate() {
            let sub = diag + usize::from(!eq(l, s));
            let best = sub.min(row[j] + 1).min(row[j + 1] + 1);
            diag = row[j + 1];
            row[j + 1] = best;
        }
    }
    row[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn run(truth: &str, received: &str) -> Vec<EditOp> {
        align(&chars(truth), &chars(received), |a, b| a == b)
            .chronological()
            .collect()
    }

    #[test]
    fn identical_sequences_keep_everything() {
        assert_eq!(run("abc", "abc"), vec![EditOp::Keep; 3]);
    }

    #[test]
    fn empty_inputs() {
        assert!(run("", "").is_empty());
        assert_eq!(run("", "ab"), vec![EditOp::Add, EditOp::Add]);
        assert_eq!(run("ab", ""), vec![EditOp::Delete, EditOp::Delete]);
    }

    #[test]
    fn backtrace_order_is_reverse_of_chronological() {
        let script = align(&chars("abc"), &chars("ac"), |a, b| a == b);
        assert_eq!(
            script.backtrace(),
            &[EditOp::Keep, EditOp::Delete, EditOp::Keep]
        );
        let forward: Vec<_> = script.chronological().collect();
        assert_eq!(forward, vec![EditOp::Keep, EditOp::Delete, EditOp::Keep]);
    }

    #[test]
    fn single_insertion_at_end() {
        assert_eq!(
            run("abc", "abcd"),
            vec![EditOp::Keep, EditOp::Keep, EditOp::Keep, EditOp::Add]
        );
    }

    #[test]
    fn leading_delete_before_match() {
        let script = align(&chars("ab"), &chars("b"), |a, b| a == b);
        assert_eq!(script.backtrace(), &[EditOp::Keep, EditOp::Delete]);
        assert_eq!(script.cost(), 1);
    }

    #[test]
    fn substitution_wins_ties_over_add_and_delete() {
        // "ab" -> "ba" costs 2 either as two substitutions or as
        // delete/keep/add; substitution must be chosen.
        assert_eq!(run("ab", "ba"), vec![EditOp::Modify, EditOp::Modify]);
        assert_eq!(run("xa", "ay"), vec![EditOp::Modify, EditOp::Modify]);
    }

    #[test]
    fn counts_and_cost() {
        let script = align(&chars("kitten"), &chars("sitting"), |a, b| a == b);
        assert_eq!(script.cost(), 3);
        let counts = script.counts();
        assert_eq!(counts.modify + counts.add + counts.delete, 3);
        assert_eq!(counts.keep + counts.modify + counts.delete, 6);
        assert_eq!(counts.keep + counts.modify + counts.add, 7);
    }

    #[test]
    fn rolling_distance_matches_either_orientation() {
        let a = chars("sunday");
        let b = chars("saturday");
        assert_eq!(edit_distance(&a, &b, |x, y| x == y), 3);
        assert_eq!(edit_distance(&b, &a, |x, y| x == y), 3);
        assert_eq!(edit_distance::<char, char, _>(&[], &[], |x, y| x == y), 0);
    }

    #[test]
    fn heterogeneous_predicate() {
        let truth = [1u8, 2, 3];
        let received = ["1", "3"];
        let script = align(&truth, &received, |t, r| t.to_string() == *r);
        let ops: Vec<_> = script.chronological().collect();
        assert_eq!(ops, vec![EditOp::Keep, EditOp::Delete, EditOp::Keep]);
    }
}
