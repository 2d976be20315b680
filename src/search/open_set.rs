use grid_util::point::Point;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::TieBreak;

/// Frontier entry: grid coordinates plus the accumulated cost `g` and the heuristic estimate `h`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenNode {
    pub x: i32,
    pub y: i32,
    pub g: u32,
    pub h: u32,
}

impl OpenNode {
    pub fn new(point: Point, g: u32, h: u32) -> OpenNode {
        OpenNode {
            x: point.x,
            y: point.y,
            g,
            h,
        }
    }

    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

struct SmallestCostHolder {
    estimated_cost: u32,
    rank: u64,
    node: OpenNode,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.rank == other.rank
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest f first, then the highest rank among equal f
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.rank.cmp(&other.rank),
            s => s,
        }
    }
}

/// Min-priority queue over [OpenNode]s keyed on `f = g + h`. Ties are resolved by insertion
/// order as selected by [TieBreak], which makes the pop order match a stable descending sort of
/// the frontier followed by taking the last element.
pub struct OpenSet {
    heap: BinaryHeap<SmallestCostHolder>,
    tie_break: TieBreak,
    pushed: u64,
}

impl OpenSet {
    pub fn new(tie_break: TieBreak) -> OpenSet {
        OpenSet {
            heap: BinaryHeap::new(),
            tie_break,
            pushed: 0,
        }
    }

    /// Queues a node. `index` is an opaque handle handed back by [pop](Self::pop).
    pub fn push(&mut self, node: OpenNode, index: usize) {
        let rank = match self.tie_break {
            TieBreak::Newest => self.pushed,
            TieBreak::Oldest => u64::MAX - self.pushed,
        };
        self.pushed += 1;
        self.heap.push(SmallestCostHolder {
            estimated_cost: node.f(),
            rank,
            node,
            index,
        });
    }

    pub fn pop(&mut self) -> Option<(OpenNode, usize)> {
        self.heap.pop().map(|holder| (holder.node, holder.index))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
