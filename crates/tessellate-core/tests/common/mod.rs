//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use tessellate_core::{Grid, Task, TaskFile, TestCase, TrainingPair};

pub fn grid(rows: &[&[u8]]) -> Grid {
    Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

/// Place a copy of `input` at every tile whose matching cell of `input` is
/// colored, leaving the rest background.
pub fn self_tiling(input: &Grid) -> Grid {
    let (rows, cols) = input.shape();
    let cells = (0..rows * rows)
        .map(|r| {
            (0..cols * cols)
                .map(|c| {
                    if input.get(r / rows, c / cols) != 0 {
                        input.get(r % rows, c % cols)
                    } else {
                        0
                    }
                })
                .collect()
        })
        .collect();
    Grid::from_rows(cells).unwrap()
}

pub fn pair(input: Grid, output: Grid) -> TrainingPair {
    TrainingPair { input, output }
}

/// Two training pairs solved by tiling the input where it is non-zero.
pub fn self_tiling_task() -> Task {
    let first = grid(&[&[0, 7, 7], &[7, 7, 7], &[0, 7, 7]]);
    let second = grid(&[&[4, 0, 4], &[0, 0, 0], &[0, 4, 0]]);
    Task::new(
        "self-tiling",
        vec![
            pair(first.clone(), self_tiling(&first)),
            pair(second.clone(), self_tiling(&second)),
        ],
        vec![TestCase {
            input: grid(&[&[7, 0, 7], &[7, 0, 7], &[7, 7, 0]]),
            output: None,
        }],
    )
}

/// Output is the input followed by its quarter turn.
pub fn rotating_task() -> Task {
    Task::new(
        "rotating",
        vec![pair(
            grid(&[&[1, 2], &[3, 4]]),
            grid(&[&[1, 2, 2, 4], &[3, 4, 1, 3]]),
        )],
        vec![],
    )
}

/// Parse a task the way the command-line front end does.
pub fn task_from_json(id: &str, json: &str) -> Task {
    let file: TaskFile = serde_json::from_str(json).unwrap();
    Task::from_file(id, file)
}
