use grid_astar::{Grid, MazeGenerator, PathFinder, Point, DEFAULT_WALL_PROBABILITY};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Generates a random 20x20 maze and searches it corner to corner. Change the
// seed to get a different maze; roughly one in five cells becomes a wall.

fn main() {
    let mut grid = Grid::new(20, 20, Point::new(0, 0), Point::new(19, 19)).unwrap();
    let mut generator = MazeGenerator::new(StdRng::seed_from_u64(7));
    generator
        .generate(&mut grid, DEFAULT_WALL_PROBABILITY)
        .unwrap();
    println!("{}", grid);
    let finder = PathFinder::new();
    match finder
        .find_path(&mut grid, Point::new(0, 0), Point::new(19, 19))
        .unwrap()
    {
        Some(path) => {
            println!("Path of {} cells:", path.len());
            for p in path {
                println!("{:?}", p);
            }
        }
        None => println!("No path"),
    }
}
