use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{Grid, MazeGenerator, PathFinder, Point};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

fn maze_bench(c: &mut Criterion) {
    const N: usize = 64;
    let finder = PathFinder::new();
    for wall_probability in [0.0, 0.2, 0.4] {
        let far = N as i32 - 1;
        let mut grid = Grid::new(N, N, Point::new(0, 0), Point::new(far, far)).unwrap();
        MazeGenerator::new(StdRng::seed_from_u64(0))
            .generate(&mut grid, wall_probability)
            .unwrap();
        c.bench_function(
            format!("{N}x{N} maze, wall probability {wall_probability}").as_str(),
            |b| {
                b.iter(|| {
                    black_box(
                        finder
                            .find_path(&mut grid, Point::new(0, 0), Point::new(far, far))
                            .unwrap(),
                    )
                })
            },
        );
    }
}

criterion_group!(benches, maze_bench);
criterion_main!(benches);
