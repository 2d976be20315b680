use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexMap;
use log::{debug, info};
use smallvec::SmallVec;

use super::{
    is_valid, manhattan, Marking, OpenNode, OpenSet, SearchPath, SearchSettings, NEIGHBOURS,
};
use crate::board::Board;
use crate::cell::CellState;
use crate::components::Components;
use crate::error::{InvalidReason, SearchError};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Succeeded,
    Failed,
}

/// A single A* run over a mutably borrowed [Board].
///
/// Cells are marked [Closed](CellState::Closed) as they are queued and [Path](CellState::Path)
/// as they are expanded, so the board doubles as the closed set. Every cell is queued at most
/// once. On success the start cell is recoloured to [Start](CellState::Start) and the goal to
/// [Finish](CellState::Finish).
pub struct AstarSearch<'a> {
    board: &'a mut Board,
    start: Point,
    goal: Point,
    marking: Marking,
    open: OpenSet,
    // Discovery order of every queued cell and the index of the node it was reached from.
    parents: FxIndexMap<Point, usize>,
    state: SearchState,
    expanded: usize,
    route: Vec<Point>,
}

fn check_endpoint(board: &Board, point: Point) -> Result<(), SearchError> {
    match board.get_point(&point) {
        Some(CellState::Empty) => Ok(()),
        Some(state) => Err(SearchError::InvalidCoordinate {
            point,
            reason: InvalidReason::Occupied(state),
        }),
        None => Err(SearchError::InvalidCoordinate {
            point,
            reason: InvalidReason::OutOfBounds {
                height: board.height(),
                width: board.width(),
            },
        }),
    }
}

fn reverse_path(parents: &FxIndexMap<Point, usize>, start: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut index = start;
    while let Some((node, &parent)) = parents.get_index(index) {
        path.push(*node);
        index = parent;
    }
    path.reverse();
    path
}

impl<'a> AstarSearch<'a> {
    /// Validates both endpoints and seeds the open set with the start cell. Start and goal have to
    /// be in bounds and [Empty](CellState::Empty); nothing is written to the board otherwise.
    pub fn new(
        board: &'a mut Board,
        start: Point,
        goal: Point,
        settings: &SearchSettings,
    ) -> Result<AstarSearch<'a>, SearchError> {
        check_endpoint(board, start)?;
        check_endpoint(board, goal)?;
        let unreachable =
            settings.precheck_components && !Components::new(board).reachable(&start, &goal);
        let mut search = AstarSearch {
            board,
            start,
            goal,
            marking: settings.marking,
            open: OpenSet::new(settings.tie_break),
            parents: FxIndexMap::default(),
            state: SearchState::Running,
            expanded: 0,
            route: Vec::new(),
        };
        if unreachable {
            info!("{} is not reachable from {}", goal, start);
            search.state = SearchState::Failed;
        } else {
            debug!("Searching from {} to {}", start, goal);
            search.add_to_open(start, 0, manhattan(&start, &goal), NO_PARENT);
        }
        Ok(search)
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of cells waiting in the open set.
    pub fn frontier(&self) -> usize {
        self.open.len()
    }

    fn add_to_open(&mut self, point: Point, g: u32, h: u32, parent: usize) {
        let (index, _) = self.parents.insert_full(point, parent);
        self.open.push(OpenNode::new(point, g, h), index);
        self.board.set_point(&point, CellState::Closed);
    }

    fn expansion(&self, node: &OpenNode) -> SmallVec<[Point; 4]> {
        NEIGHBOURS
            .iter()
            .map(|(dx, dy)| Point::new(node.x + dx, node.y + dy))
            .filter(|p| is_valid(p.x, p.y, self.board))
            .collect()
    }

    /// Expands the best node of the open set and returns the resulting state. Does nothing once
    /// the search has finished.
    pub fn step(&mut self) -> SearchState {
        if self.state != SearchState::Running {
            return self.state;
        }
        let Some((current, index)) = self.open.pop() else {
            info!(
                "Open set exhausted after {} expansions, {} is not reachable from {}",
                self.expanded, self.goal, self.start
            );
            self.state = SearchState::Failed;
            return self.state;
        };
        self.expanded += 1;
        let point = current.point();
        self.board.set_point(&point, CellState::Path);

        if point == self.goal {
            self.finish(index);
            return self.state;
        }
        for neighbour in self.expansion(&current) {
            let h = manhattan(&neighbour, &self.goal);
            self.add_to_open(neighbour, current.g + 1, h, index);
        }
        self.state
    }

    fn finish(&mut self, goal_index: usize) {
        self.route = reverse_path(&self.parents, goal_index);
        if self.marking == Marking::Route {
            let on_route: FxHashSet<Point> = self.route.iter().copied().collect();
            for point in self.parents.keys() {
                if !on_route.contains(point)
                    && self.board.get_point(point) == Some(CellState::Path)
                {
                    self.board.set_point(point, CellState::Closed);
                }
            }
        }
        self.board.set_point(&self.start, CellState::Start);
        self.board.set_point(&self.goal, CellState::Finish);
        info!(
            "Reached {} from {} in {} steps ({} expansions)",
            self.goal,
            self.start,
            self.route.len() - 1,
            self.expanded
        );
        self.state = SearchState::Succeeded;
    }

    /// Steps until the goal is reached or the open set is exhausted.
    pub fn run(mut self) -> Option<SearchPath> {
        while self.step() == SearchState::Running {}
        match self.state {
            SearchState::Succeeded => Some(SearchPath {
                route: self.route,
                expanded: self.expanded,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{search, search_with, TieBreak};

    fn wall_board(gap: Option<i32>) -> Board {
        let mut board = Board::new(5, 5);
        for x in 0..5 {
            if Some(x) != gap {
                board.set(x, 2, CellState::Obstacle);
            }
        }
        board
    }

    fn assert_connected(route: &[Point], board: &Board) {
        for pair in route.windows(2) {
            assert_eq!(manhattan(&pair[0], &pair[1]), 1);
        }
        for p in route {
            assert!(!board.get_point(p).unwrap().is_obstacle());
        }
    }

    /// Straight line along the top row of an open board.
    #[test]
    fn open_board_straight_line() {
        let mut board = Board::new(5, 5);
        let path = search(&mut board, Point::new(0, 0), Point::new(0, 4))
            .unwrap()
            .unwrap();
        assert_eq!(path.steps(), 4);
        assert_eq!(path.expanded, 5);
        let expected: Vec<Point> = (0..5).map(|y| Point::new(0, y)).collect();
        assert_eq!(path.route, expected);
        assert_eq!(board.count(CellState::Path), 3);
        assert_eq!(board.get(0, 0), Some(CellState::Start));
        assert_eq!(board.get(0, 4), Some(CellState::Finish));
        // Cells queued below the line but never expanded
        assert_eq!(board.count(CellState::Closed), 4);
    }

    #[test]
    fn open_board_corner_to_corner() {
        let mut board = Board::new(5, 5);
        let path = search(&mut board, Point::new(0, 0), Point::new(4, 4))
            .unwrap()
            .unwrap();
        assert_eq!(path.steps(), 8);
        assert_eq!(path.expanded, 9);
        assert_eq!(path.start(), Point::new(0, 0));
        assert_eq!(path.goal(), Point::new(4, 4));
        assert_connected(&path.route, &board);
    }

    /// Preferring the oldest node among ties floods the whole board before reaching the corner,
    /// the route stays optimal.
    #[test]
    fn oldest_tie_break_expands_more() {
        let mut board = Board::new(5, 5);
        let settings = SearchSettings {
            tie_break: TieBreak::Oldest,
            ..SearchSettings::default()
        };
        let path = search_with(&mut board, Point::new(0, 0), Point::new(4, 4), &settings)
            .unwrap()
            .unwrap();
        assert_eq!(path.steps(), 8);
        assert_eq!(path.expanded, 25);
        assert_eq!(board.count(CellState::Closed), 0);
    }

    #[test]
    fn full_wall_fails() {
        let mut board = wall_board(None);
        let result = search(&mut board, Point::new(0, 0), Point::new(0, 4)).unwrap();
        assert!(result.is_none());
        assert_eq!(board.count(CellState::Start), 0);
        assert_eq!(board.count(CellState::Finish), 0);
        // Everything left of the wall was flooded
        assert_eq!(board.count(CellState::Path), 10);
        assert_eq!(board.get(0, 4), Some(CellState::Empty));
    }

    #[test]
    fn precheck_skips_the_flood() {
        let mut board = wall_board(None);
        let settings = SearchSettings {
            precheck_components: true,
            ..SearchSettings::default()
        };
        let search = AstarSearch::new(&mut board, Point::new(0, 0), Point::new(0, 4), &settings)
            .unwrap();
        assert_eq!(search.state(), SearchState::Failed);
        assert!(search.run().is_none());
        assert_eq!(board, wall_board(None));
    }

    #[test]
    fn precheck_passes_reachable_goals() {
        let mut board = wall_board(Some(4));
        let settings = SearchSettings {
            precheck_components: true,
            ..SearchSettings::default()
        };
        let path = search_with(&mut board, Point::new(0, 0), Point::new(0, 4), &settings)
            .unwrap()
            .unwrap();
        assert_eq!(path.steps(), 12);
    }

    /// The wall forces four extra steps down and four back up.
    #[test]
    fn single_gap_detour() {
        let mut board = wall_board(Some(4));
        let path = search(&mut board, Point::new(0, 0), Point::new(0, 4))
            .unwrap()
            .unwrap();
        assert_eq!(path.steps(), 4 + 2 * 4);
        assert_eq!(path.expanded, 17);
        assert!(path.route.contains(&Point::new(4, 2)));
        assert_connected(&path.route, &board);
        assert_eq!(board.count(CellState::Path), 15);
    }

    #[test]
    fn route_marking_keeps_only_the_route() {
        let mut board = wall_board(Some(4));
        let settings = SearchSettings {
            marking: Marking::Route,
            ..SearchSettings::default()
        };
        let path = search_with(&mut board, Point::new(0, 0), Point::new(0, 4), &settings)
            .unwrap()
            .unwrap();
        assert_eq!(board.count(CellState::Path), path.route.len() - 2);
        for p in &path.route[1..path.route.len() - 1] {
            assert_eq!(board.get_point(p), Some(CellState::Path));
        }
        assert_eq!(board.count(CellState::Closed), 7);
    }

    /// Every route cell was expanded, so it is marked on the board.
    #[test]
    fn route_is_subset_of_marked_cells() {
        let mut board = wall_board(Some(4));
        let path = search(&mut board, Point::new(0, 0), Point::new(0, 4))
            .unwrap()
            .unwrap();
        for p in &path.route {
            let state = board.get_point(p).unwrap();
            assert!(matches!(
                state,
                CellState::Path | CellState::Start | CellState::Finish
            ));
        }
    }

    #[test]
    fn equal_start_goal() {
        let mut board = Board::new(5, 5);
        let p = Point::new(2, 2);
        let path = search(&mut board, p, p).unwrap().unwrap();
        assert_eq!(path.route, vec![p]);
        assert_eq!(path.steps(), 0);
        assert_eq!(board.get_point(&p), Some(CellState::Finish));
        assert_eq!(board.count(CellState::Start), 0);
    }

    #[test]
    fn state_machine_steps() {
        let mut board = Board::new(5, 5);
        let mut search = AstarSearch::new(
            &mut board,
            Point::new(0, 0),
            Point::new(0, 4),
            &SearchSettings::new(),
        )
        .unwrap();
        assert_eq!(search.state(), SearchState::Running);
        assert_eq!(search.frontier(), 1);
        for _ in 0..4 {
            assert_eq!(search.step(), SearchState::Running);
        }
        assert_eq!(search.step(), SearchState::Succeeded);
        assert_eq!(search.step(), SearchState::Succeeded);
    }

    #[test]
    fn invalid_endpoints_are_rejected() {
        let mut board = wall_board(None);
        let err = search(&mut board, Point::new(5, 0), Point::new(0, 4)).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidCoordinate {
                point: Point::new(5, 0),
                reason: InvalidReason::OutOfBounds {
                    height: 5,
                    width: 5
                },
            }
        );
        let err = search(&mut board, Point::new(0, 0), Point::new(0, 2)).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidCoordinate {
                point: Point::new(0, 2),
                reason: InvalidReason::Occupied(CellState::Obstacle),
            }
        );
        assert_eq!(board, wall_board(None));
    }

    /// A board that still carries marks from an earlier run is refused until it is cleared.
    #[test]
    fn searched_board_needs_clearing() {
        let mut board = Board::new(3, 3);
        let (start, goal) = (Point::new(0, 0), Point::new(2, 2));
        search(&mut board, start, goal).unwrap().unwrap();
        assert!(matches!(
            search(&mut board, start, goal),
            Err(SearchError::InvalidCoordinate {
                reason: InvalidReason::Occupied(CellState::Start),
                ..
            })
        ));
        board.clear_search_marks();
        assert!(search(&mut board, start, goal).unwrap().is_some());
    }

    #[test]
    fn empty_board_has_no_valid_coordinates() {
        let mut board = Board::default();
        assert!(search(&mut board, Point::new(0, 0), Point::new(0, 0)).is_err());
    }
}
