//! Board state representation for move validation
//!
//! [`BoardState`] is a borrowed, read-only snapshot of everything the rules
//! need: the static world, where the attack boards are, and the pieces. All
//! validators take one of these and never mutate it.

use crate::tracks::AttackBoards;
use crate::types::{Color, Level, Piece, PieceId, PieceKind, ResolvedLevel, Square};
use crate::world::{logical_level, resolve_level, World};

#[derive(Debug, Clone, Copy)]
pub struct BoardState<'a> {
    pub world: &'a World,
    pub boards: &'a AttackBoards,
    pub pieces: &'a [Piece],
}

impl<'a> BoardState<'a> {
    pub fn new(world: &'a World, boards: &'a AttackBoards, pieces: &'a [Piece]) -> Self {
        BoardState {
            world,
            boards,
            pieces,
        }
    }

    /// Same world and boards, different piece list (used for simulations)
    pub fn with_pieces<'b>(&self, pieces: &'b [Piece]) -> BoardState<'b>
    where
        'a: 'b,
    {
        BoardState {
            world: self.world,
            boards: self.boards,
            pieces,
        }
    }

    /// Current square of a piece
    pub fn square_of(&self, piece: &Piece) -> Square {
        Square::new(piece.file, piece.rank, resolve_level(piece.level, self.boards))
    }

    pub fn find_piece(&self, id: PieceId) -> Option<&'a Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn piece_at(&self, square: Square) -> Option<&'a Piece> {
        self.pieces.iter().find(|p| self.square_of(p) == square)
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn get_piece_color(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    /// Main boards are always visible; a pin only while a board is on it
    pub fn is_level_visible(&self, level: ResolvedLevel) -> bool {
        match level {
            ResolvedLevel::Main(_) => true,
            ResolvedLevel::Pin(pin) => self.boards.is_active(pin),
        }
    }

    pub fn is_visible(&self, square: Square) -> bool {
        self.world.contains(square) && self.is_level_visible(square.level)
    }

    /// Squares currently present at `(file, rank)` on any level
    pub fn visible_squares_at(&self, file: u8, rank: u8) -> impl Iterator<Item = Square> + '_ {
        self.world
            .squares_at(file, rank)
            .filter(move |s| self.is_level_visible(s.level))
    }

    pub fn visible_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.world
            .squares()
            .iter()
            .copied()
            .filter(move |s| self.is_level_visible(s.level))
    }

    /// Pieces standing on `(file, rank)` at any level
    pub fn occupants_at(&self, file: u8, rank: u8) -> impl Iterator<Item = &'a Piece> + '_ {
        self.pieces
            .iter()
            .filter(move |p| p.file == file && p.rank == rank)
    }

    /// True when no level at `(file, rank)` holds a piece
    pub fn is_coordinate_empty(&self, file: u8, rank: u8) -> bool {
        self.occupants_at(file, rank).next().is_none()
    }

    /// Logical board a piece landing on `square` would stand on
    pub fn logical_level(&self, square: Square) -> Option<Level> {
        logical_level(square.level, self.boards)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &'a Piece> + '_ {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| self.square_of(p))
    }
}
