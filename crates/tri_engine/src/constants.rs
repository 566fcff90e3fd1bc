//! Static geometry of the playing field
//!
//! Three 4×4 main boards are stacked with a two-rank overlap, and each of the
//! two attack-board tracks offers six pins hanging off the main-board corners.
//!
//! ```text
//! board  files  ranks
//! W      a-d    1-4
//! N      a-d    3-6
//! B      a-d    5-8
//! QLn    z-a    PIN_RANK_BASE[n-1] ..= +1
//! KLn    d-e    PIN_RANK_BASE[n-1] ..= +1
//! ```
//!
//! Level ranks are counted in half steps so an attack board can sit between
//! its main board and the next one up.

use crate::types::MainBoard;

/// Number of file columns (`z a b c d e`)
pub const FILE_COUNT: u8 = 6;

/// Number of ranks (`0..=9`)
pub const RANK_COUNT: u8 = 10;

/// File letters indexed by file number
pub const FILE_LETTERS: [char; FILE_COUNT as usize] = ['z', 'a', 'b', 'c', 'd', 'e'];

/// Files spanned by every main board
pub const MAIN_FILE_MIN: u8 = 1;
pub const MAIN_FILE_MAX: u8 = 4;

/// Pins per track
pub const PIN_COUNT: u8 = 6;

/// Side length of an attack board
pub const ATTACK_BOARD_SIZE: u8 = 2;

/// Lowest rank covered by pin `n` (index `n - 1`)
pub const PIN_RANK_BASE: [u8; PIN_COUNT as usize] = [0, 2, 4, 4, 6, 8];

/// Main board each pin hangs off (index `n - 1`)
pub const PIN_MAIN_BOARD: [MainBoard; PIN_COUNT as usize] = [
    MainBoard::W,
    MainBoard::N,
    MainBoard::W,
    MainBoard::B,
    MainBoard::N,
    MainBoard::B,
];

/// Along-track neighbours of pin `n` (index `n - 1`)
pub const PIN_NEIGHBOURS: [&[u8]; PIN_COUNT as usize] = [
    &[2, 3],
    &[1, 3, 5],
    &[1, 2, 4],
    &[3, 5, 6],
    &[2, 4, 6],
    &[4, 5],
];

/// First file of the queen's-line track
pub const QL_FILE_BASE: u8 = 0;

/// First file of the king's-line track
pub const KL_FILE_BASE: u8 = 4;

/// White pawns promote here, black on rank 0
pub const WHITE_PROMOTION_RANK: u8 = 9;
pub const BLACK_PROMOTION_RANK: u8 = 0;

/// Home pin numbers
pub const WHITE_HOME_PIN: u8 = 1;
pub const BLACK_HOME_PIN: u8 = 6;

/// Back ranks (where king and rooks start)
pub const WHITE_BACK_RANK: u8 = 0;
pub const BLACK_BACK_RANK: u8 = 9;
