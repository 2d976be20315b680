use csv::ReaderBuilder;
use grid_util::point::Point;
use serde::Deserialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One search to run against a fixture board. `steps` is empty in the table when the goal is
/// unreachable.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    start_row: i32,
    start_col: i32,
    goal_row: i32,
    goal_col: i32,
    pub steps: Option<usize>,
    pub expanded: Option<usize>,
}

impl Scenario {
    pub fn start(&self) -> Point {
        Point::new(self.start_row, self.start_col)
    }

    pub fn goal(&self) -> Point {
        Point::new(self.goal_row, self.goal_col)
    }
}

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).to_path_buf()
}

fn load_fixture(name: &str) -> (String, Vec<Scenario>) {
    let root = fixture_root();
    let board_text = fs::read_to_string(root.join(format!("boards/{}.txt", name)))
        .expect("Could not read board file");

    let file = File::open(root.join(format!("scenarios/{}.csv", name)))
        .expect("Could not open scenario file");
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let scenarios = csv_reader
        .deserialize()
        .map(|result| result.expect("Could not parse scenario record"))
        .collect::<Vec<Scenario>>();
    (board_text, scenarios)
}

/// Names of all boards that have a scenario table, sorted.
pub fn get_fixture_names() -> Vec<String> {
    let root = fixture_root().join("boards");
    let mut names = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).into_iter() {
        let entry = entry.expect("Could not get dir entry");
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .expect("Board file name is not valid UTF-8");
        if fixture_root()
            .join(format!("scenarios/{}.csv", name))
            .exists()
        {
            names.push(name.to_owned());
        }
    }
    names.sort();
    names
}

/// Raw board text and its scenarios.
///
/// # Panics
/// If no fixture called `name` exists.
pub fn get_fixture(name: &str) -> (String, Vec<Scenario>) {
    if get_fixture_names().iter().any(|n| n == name) {
        load_fixture(name)
    } else {
        panic!("Could not load fixture {name}!");
    }
}
