/// State of a single board position. Search bookkeeping lives in the same tag as the static
/// terrain: a cell moves from [Empty](CellState::Empty) to [Closed](CellState::Closed) when it is
/// queued and to [Path](CellState::Path) once it has been expanded. [Obstacle](CellState::Obstacle)
/// never changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Obstacle,
    Closed,
    Path,
    Start,
    Finish,
}

impl CellState {
    /// Maps an integer from a board file onto a cell: `0` is empty, anything else is an obstacle.
    pub fn from_value(value: i64) -> CellState {
        if value == 0 {
            CellState::Empty
        } else {
            CellState::Obstacle
        }
    }

    /// Fixed-width token used when printing a board.
    pub fn token(self) -> &'static str {
        match self {
            CellState::Obstacle => "X   ",
            CellState::Path => "*   ",
            CellState::Start => "S   ",
            CellState::Finish => "G   ",
            _ => "0   ",
        }
    }

    pub fn is_obstacle(self) -> bool {
        self == CellState::Obstacle
    }

    /// True for the states written by a search run.
    pub fn is_search_mark(self) -> bool {
        matches!(
            self,
            CellState::Closed | CellState::Path | CellState::Start | CellState::Finish
        )
    }
}
