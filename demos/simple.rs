use grid_astar::{Grid, PathFinder, Point};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighbourhood

fn main() {
    let mut grid = Grid::new(3, 3, Point::new(0, 0), Point::new(2, 2)).unwrap();
    grid.set_walkable(1, 1, false).unwrap();
    println!("{}", grid);
    let finder = PathFinder::new();
    let path = finder
        .find_path(&mut grid, Point::new(0, 0), Point::new(2, 2))
        .unwrap()
        .expect("the corners are connected");
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
