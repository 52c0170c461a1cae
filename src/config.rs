//! Fixed board geometry and search limits.

/// Number of rows on a board (`A` through `J`).
pub const ROWS: usize = 10;
/// Number of columns on a board (`1` through `10`).
pub const COLS: usize = 10;

/// Cap on the room counted in one direction from a cell. A ship of at most
/// five cells can extend at most four cells past any cell it covers.
pub const MAX_SPACE: usize = 4;

/// How many random candidates `Board::place_random` tries before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 1000;
