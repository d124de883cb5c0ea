use rand::SeedableRng;
use rand::rngs::StdRng;

use pixel_canvas::tools::{self, BrushRadius, Paint, ToolOutcome};
use pixel_canvas::{Color, Coord, Grid, GridError, ToolKind};

fn paint(radius: usize) -> Paint {
    Paint { radius: BrushRadius::clamped(radius, 5), ..Paint::default() }
}

fn writes(tool: ToolKind, target: Coord, radius: usize, grid: &Grid) -> ToolOutcome {
    let mut rng = StdRng::seed_from_u64(1);
    tools::apply(tool, target, &paint(radius), grid, &mut rng).unwrap()
}

#[test]
fn brush_is_clipped_at_the_edges() {
    let grid = Grid::new(8, Color::WHITE).unwrap();

    assert_eq!(writes(ToolKind::Pencil, Coord::new(4, 4), 1, &grid).writes().len(), 9);
    assert_eq!(writes(ToolKind::Pencil, Coord::new(4, 4), 2, &grid).writes().len(), 25);
    assert_eq!(writes(ToolKind::Pencil, Coord::new(0, 0), 1, &grid).writes().len(), 4);
    assert_eq!(writes(ToolKind::Pencil, Coord::new(0, 4), 1, &grid).writes().len(), 6);
    assert_eq!(writes(ToolKind::Pencil, Coord::new(7, 7), 3, &grid).writes().len(), 16);
}

#[test]
fn target_cell_is_written_first() {
    let grid = Grid::new(5, Color::WHITE).unwrap();
    let outcome = writes(ToolKind::Eraser, Coord::new(2, 3), 2, &grid);
    assert_eq!(outcome.writes()[0].coord, Coord::new(2, 3));
    assert!(outcome.writes().iter().all(|w| w.color == Color::WHITE));
}

#[test]
fn rainbow_draws_a_color_per_cell() {
    let grid = Grid::new(4, Color::WHITE).unwrap();
    let outcome = writes(ToolKind::Rainbow, Coord::new(1, 1), 1, &grid);
    let colors: Vec<_> = outcome.writes().iter().map(|w| w.color).collect();

    assert_eq!(colors.len(), 9);
    assert!(colors.iter().any(|c| *c != colors[0]));
}

#[test]
fn shading_stops_at_white_and_black() {
    let white = Grid::new(3, Color::WHITE).unwrap();
    assert!(writes(ToolKind::Lighten, Coord::new(1, 1), 1, &white).writes().is_empty());

    let black = Grid::new(3, Color::BLACK).unwrap();
    assert!(writes(ToolKind::Darken, Coord::new(1, 1), 0, &black).writes().is_empty());

    let gray = Grid::new(3, Color::rgb(128, 128, 128)).unwrap();
    let outcome = writes(ToolKind::Darken, Coord::new(1, 1), 0, &gray);
    let darker = outcome.writes()[0].color;
    assert!(darker.to_hsl().l < Color::rgb(128, 128, 128).to_hsl().l);
}

#[test]
fn out_of_bounds_target_fails_without_writes() {
    let grid = Grid::new(3, Color::WHITE).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        tools::apply(ToolKind::Pencil, Coord::new(3, 0), &paint(1), &grid, &mut rng),
        Err(GridError::OutOfBounds { row: 3, col: 0, size: 3 })
    );
}
