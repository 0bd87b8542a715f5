//! Basic example of using the tessellation engine

use tessellate_core::{Grid, Strategy, Task, TessellationSolver, TestCase, TrainingPair};

/// Place a copy of `input` wherever `input` itself has a colored cell.
fn self_tiling(input: &Grid) -> Grid {
    let (rows, cols) = input.shape();
    let mut cells = vec![vec![0; cols * cols]; rows * rows];
    for (r, row) in cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            if input.get(r / rows, c / cols) != 0 {
                *cell = input.get(r % rows, c % cols);
            }
        }
    }
    Grid::from_rows(cells).unwrap_or_else(|_| input.clone())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let first = Grid::from_rows(vec![vec![0, 7, 7], vec![7, 7, 7], vec![0, 7, 7]])?;
    let second = Grid::from_rows(vec![vec![4, 0, 4], vec![0, 0, 0], vec![0, 4, 0]])?;
    let test = Grid::from_rows(vec![vec![2, 2, 2], vec![0, 0, 0], vec![0, 2, 2]])?;

    let task = Task::new(
        "self-tiling",
        vec![
            TrainingPair {
                output: self_tiling(&first),
                input: first,
            },
            TrainingPair {
                output: self_tiling(&second),
                input: second,
            },
        ],
        vec![TestCase {
            input: test,
            output: None,
        }],
    );

    println!("Training pair 1:");
    println!("{}", task.train[0].input);
    println!("->");
    println!("{}\n", task.train[0].output);

    let mut solver = TessellationSolver::new();
    println!("Gate accepts task: {}", solver.detect(&task));

    // Search the standard catalog
    let outcome = solver.search(&task);
    println!("Search: {}", outcome);
    let stats = solver.stats();
    println!(
        "Evaluated {} candidates, {} trials ({} failed)\n",
        stats.candidates, stats.trials, stats.failures
    );

    for (index, prediction) in solver.predict(&task).into_iter().enumerate() {
        match prediction {
            Ok(grid) => {
                println!("Prediction for test input {}:", index);
                println!("{}", grid);
            }
            Err(err) => println!("Test input {} failed: {}", index, err),
        }
    }
    Ok(())
}
