//! Precomputed geometry: compass offsets, distance to the board edge, and leaper deltas.

/// Index offsets for the eight compass directions.
///
/// Order: N, S, W, E, NW, SE, NE, SW. Rooks use `0..4`, bishops `4..8`.
pub(super) const DIRECTION_OFFSETS: [i8; 8] = [8, -8, -1, 1, 7, -7, 9, -9];

pub(super) const ORTHOGONAL: std::ops::Range<usize> = 0..4;
pub(super) const DIAGONAL: std::ops::Range<usize> = 4..8;
pub(super) const ALL_DIRECTIONS: std::ops::Range<usize> = 0..8;

/// `DISTANCE_TO_EDGE[sq][dir]` is how many steps a slider on `sq` can take in
/// `DIRECTION_OFFSETS[dir]` before leaving the board.
pub(super) const DISTANCE_TO_EDGE: [[u8; 8]; 64] = compute_distance_to_edge();

const fn min(a: u8, b: u8) -> u8 {
    if a < b { a } else { b }
}

const fn compute_distance_to_edge() -> [[u8; 8]; 64] {
    let mut table = [[0u8; 8]; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as u8;
        let file = (sq % 8) as u8;
        let north = 7 - rank;
        let south = rank;
        let west = file;
        let east = 7 - file;
        table[sq] = [
            north,
            south,
            west,
            east,
            min(north, west),
            min(south, east),
            min(north, east),
            min(south, west),
        ];
        sq += 1;
    }
    table
}

/// Knight jumps as (file delta, rank delta).
pub(super) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2),
    (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

/// King steps as (file delta, rank delta).
pub(super) const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1),
    (0, -1), (-1, -1), (-1, 0), (-1, 1),
];
