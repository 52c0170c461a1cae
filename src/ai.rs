// Search weighting for the hunting player: how many placements of the ships
// still afloat could cover a cell, given the unshot room around it.

use rand::Rng;

use crate::board::Board;
use crate::config::{COLS, ROWS};
use crate::coord::{format_row, Coordinate};
use crate::ship::{Ship, NUM_SHIPS};

/// Placements of `ship` through `coord` along either axis that fit the room.
pub fn count_ship_freedoms(board: &Board, coord: Coordinate, ship: Ship) -> usize {
    let verts = (board.vertical_room(coord) + 1).saturating_sub(ship.size());
    let horizs = (board.horizontal_room(coord) + 1).saturating_sub(ship.size());
    verts + horizs
}

/// Sum of [`count_ship_freedoms`] over every ship kind still marked remaining.
pub fn count_freedoms(board: &Board, coord: Coordinate, remaining: &[bool; NUM_SHIPS]) -> usize {
    Ship::ALL
        .iter()
        .filter(|ship| remaining[ship.index()])
        .map(|ship| count_ship_freedoms(board, coord, *ship))
        .sum()
}

/// Weight of every cell of the board; shot cells weigh zero.
pub fn weight_map(board: &Board, remaining: &[bool; NUM_SHIPS]) -> [[usize; COLS]; ROWS] {
    let mut matrix = [[0usize; COLS]; ROWS];
    for coord in board.unshot_spots() {
        matrix[coord.row()][coord.col()] = count_freedoms(board, coord, remaining);
    }
    matrix
}

/// Text grid of a weight map.
pub fn render_weights(matrix: &[[usize; COLS]; ROWS]) -> String {
    let mut out = String::from("  ");
    for c in 1..=COLS {
        out.push_str(&format!(" {:>3}", c));
    }
    for (r, row) in matrix.iter().enumerate() {
        out.push('\n');
        out.push(format_row(r));
        out.push(' ');
        for w in row {
            out.push_str(&format!(" {:>3}", w));
        }
    }
    out
}

/// Pick one of `values` with probability proportional to its weight.
///
/// Draws `p` in `[0, 1)` and subtracts each normalized weight in turn until
/// `p` goes negative. Rounding leftovers fall through to the last value.
/// When every weight is zero the pick is uniform.
pub fn choose_by_weight<T: Copy, R: Rng + ?Sized>(
    rng: &mut R,
    values: &[T],
    weights: &[usize],
) -> Option<T> {
    let last = *values.last()?;
    let total: usize = weights.iter().sum();
    if total == 0 {
        return Some(values[rng.random_range(0..values.len())]);
    }
    let mut p: f64 = rng.random();
    for (value, weight) in values.iter().zip(weights) {
        p -= *weight as f64 / total as f64;
        if p < 0.0 {
            return Some(*value);
        }
    }
    Some(last)
}
