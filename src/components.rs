use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use petgraph::unionfind::UnionFind;

use crate::board::Board;
use crate::cell::CellState;

/// Connected components of the non-obstacle cells of a [Board] under 4-directional movement.
/// Cells carrying search marks count as open terrain.
#[derive(Clone, Debug)]
pub struct Components {
    // Obstacles, laid out like the board's own grid with x as column
    blocked: BoolGrid,
    components: UnionFind<usize>,
}

fn grid_point(point: &Point) -> Point {
    Point::new(point.y, point.x)
}

impl Components {
    /// Links every open cell to its open neighbours below and to the right.
    pub fn new(board: &Board) -> Components {
        let mut blocked = BoolGrid::new(board.width(), board.height(), false);
        for point in board.points_with(CellState::Obstacle) {
            blocked.set_point(grid_point(&point), true);
        }
        let mut components = UnionFind::new(board.width() * board.height());
        for point in (0..board.height() as i32)
            .flat_map(|x| (0..board.width() as i32).map(move |y| Point::new(x, y)))
        {
            if blocked.get_point(grid_point(&point)) {
                continue;
            }
            let parent_ix = blocked.get_ix_point(&grid_point(&point));
            [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)]
                .into_iter()
                .map(|p| grid_point(&p))
                .filter(|p| blocked.point_in_bounds(*p) && !blocked.get_point(*p))
                .for_each(|p| {
                    components.union(parent_ix, blocked.get_ix_point(&p));
                });
        }
        Components {
            blocked,
            components,
        }
    }

    fn ix(&self, point: &Point) -> Option<usize> {
        let point = grid_point(point);
        self.blocked
            .point_in_bounds(point)
            .then(|| self.blocked.get_ix_point(&point))
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn component(&self, point: &Point) -> Option<usize> {
        self.ix(point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component. Out-of-bounds points are never
    /// reachable. Obstacles only form singleton components, so this is only meaningful for open
    /// cells.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.ix(start), self.ix(goal)) {
            (Some(s), Some(g)) => self.components.equiv(s, g),
            _ => false,
        }
    }
}
