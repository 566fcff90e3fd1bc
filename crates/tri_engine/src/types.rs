//! Core identifiers of the tri-dimensional board
//!
//! Every board-level string used by the UI and the save format (`"W"`,
//! `"WQL"`, `"QL3"`, `"QL3:180"`, `"a4W"`) has a closed Rust type here, so an
//! invalid level cannot be represented once parsed. The textual forms are
//! produced by `Display`, read back by `FromStr`, and reused by serde through
//! `into`/`try_from` string conversions.
//!
//! Two layers of board identity are kept apart:
//! - [`Level`] is the *logical* board a piece stands on (`W`, `N`, `B` or one of
//!   the four attack boards). It does not change when an attack board moves.
//! - [`ResolvedLevel`] is the *physical* place (`W`, `N`, `B` or a pin). The
//!   world model maps one to the other through the current board placements.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ParseError;

/// Side to move / owner of a piece or board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this colour advance in
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may turn into
    pub fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pawn" | "p" => Ok(PieceKind::Pawn),
            "rook" | "r" => Ok(PieceKind::Rook),
            "knight" | "n" => Ok(PieceKind::Knight),
            "bishop" | "b" => Ok(PieceKind::Bishop),
            "queen" | "q" => Ok(PieceKind::Queen),
            "king" | "k" => Ok(PieceKind::King),
            _ => Err(ParseError::InvalidPiece(s.to_string())),
        }
    }
}

/// One of the three fixed boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MainBoard {
    W,
    N,
    B,
}

impl MainBoard {
    pub const ALL: [MainBoard; 3] = [MainBoard::W, MainBoard::N, MainBoard::B];

    pub fn ranks(self) -> RangeInclusive<u8> {
        match self {
            MainBoard::W => 1..=4,
            MainBoard::N => 3..=6,
            MainBoard::B => 5..=8,
        }
    }

    /// Height in half-level steps (`W=0`, `N=2`, `B=4`)
    pub fn level_rank(self) -> u8 {
        match self {
            MainBoard::W => 0,
            MainBoard::N => 2,
            MainBoard::B => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MainBoard::W => "W",
            MainBoard::N => "N",
            MainBoard::B => "B",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "W" => Some(MainBoard::W),
            "N" => Some(MainBoard::N),
            "B" => Some(MainBoard::B),
            _ => None,
        }
    }
}

/// Attack-board track: queen's line (files `z,a`) or king's line (files `d,e`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Track {
    QL,
    KL,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::QL, Track::KL];

    pub fn file_base(self) -> u8 {
        match self {
            Track::QL => QL_FILE_BASE,
            Track::KL => KL_FILE_BASE,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Track::QL => Track::KL,
            Track::KL => Track::QL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Track::QL => "QL",
            Track::KL => "KL",
        }
    }
}

/// Attachment point on a track (`QL1`..`QL6`, `KL1`..`KL6`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PinId {
    track: Track,
    number: u8,
}

impl PinId {
    /// Create a pin id
    ///
    /// Panics if `number` is outside `1..=6`; use `str::parse` for untrusted input.
    pub fn new(track: Track, number: u8) -> Self {
        assert!(
            (1..=PIN_COUNT).contains(&number),
            "Pin number must be in range 1-6"
        );
        PinId { track, number }
    }

    pub fn track(self) -> Track {
        self.track
    }

    pub fn number(self) -> u8 {
        self.number
    }

    /// All twelve pins, queen's line first
    pub fn all() -> impl Iterator<Item = PinId> {
        Track::ALL
            .into_iter()
            .flat_map(|track| (1..=PIN_COUNT).map(move |n| PinId::new(track, n)))
    }

    fn index(self) -> usize {
        (self.number - 1) as usize
    }

    pub fn rank_base(self) -> u8 {
        PIN_RANK_BASE[self.index()]
    }

    pub fn file_base(self) -> u8 {
        self.track.file_base()
    }

    pub fn main_board(self) -> MainBoard {
        PIN_MAIN_BOARD[self.index()]
    }

    /// Half a level above the main board the pin hangs off
    pub fn level_rank(self) -> u8 {
        self.main_board().level_rank() + 1
    }

    pub fn contains(self, file: u8, rank: u8) -> bool {
        let (f0, r0) = (self.file_base(), self.rank_base());
        (f0..f0 + ATTACK_BOARD_SIZE).contains(&file) && (r0..r0 + ATTACK_BOARD_SIZE).contains(&rank)
    }

    /// The four (file, rank) coordinates covered by a board on this pin
    pub fn coordinates(self) -> [(u8, u8); 4] {
        let (f0, r0) = (self.file_base(), self.rank_base());
        [(f0, r0), (f0 + 1, r0), (f0, r0 + 1), (f0 + 1, r0 + 1)]
    }

    /// Pins on the same track one step away
    pub fn along_track(self) -> impl Iterator<Item = PinId> {
        let track = self.track;
        PIN_NEIGHBOURS[self.index()]
            .iter()
            .map(move |&n| PinId::new(track, n))
    }

    /// The pin at the same position on the other track
    pub fn lateral(self) -> PinId {
        PinId::new(self.track.other(), self.number)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.track.as_str(), self.number)
    }
}

impl FromStr for PinId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidPin(s.to_string());
        let track = match s.get(..2) {
            Some("QL") => Track::QL,
            Some("KL") => Track::KL,
            _ => return Err(invalid()),
        };
        let number: u8 = s[2..].parse().map_err(|_| invalid())?;
        if !(1..=PIN_COUNT).contains(&number) {
            return Err(invalid());
        }
        Ok(PinId { track, number })
    }
}

impl From<PinId> for String {
    fn from(pin: PinId) -> Self {
        pin.to_string()
    }
}

impl TryFrom<String> for PinId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Orientation of an attack-board instance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg180,
}

impl Rotation {
    pub fn flipped(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg180 => 180,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::Deg0),
            180 => Ok(Rotation::Deg180),
            other => Err(ParseError::InvalidRotation(other.to_string())),
        }
    }
}

/// A concrete attack-board instance: pin plus orientation, e.g. `QL2:180`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct InstanceId {
    pub pin: PinId,
    pub rotation: Rotation,
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pin, self.rotation.degrees())
    }
}

impl FromStr for InstanceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pin, rotation) = s
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidPin(s.to_string()))?;
        let degrees: u16 = rotation
            .parse()
            .map_err(|_| ParseError::InvalidRotation(rotation.to_string()))?;
        Ok(InstanceId {
            pin: pin.parse()?,
            rotation: Rotation::try_from(degrees)?,
        })
    }
}

impl From<InstanceId> for String {
    fn from(id: InstanceId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for InstanceId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The four mobile boards, named by owner and home track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackBoardId {
    WQL,
    WKL,
    BQL,
    BKL,
}

impl AttackBoardId {
    pub const ALL: [AttackBoardId; 4] = [
        AttackBoardId::WQL,
        AttackBoardId::WKL,
        AttackBoardId::BQL,
        AttackBoardId::BKL,
    ];

    pub fn index(self) -> usize {
        match self {
            AttackBoardId::WQL => 0,
            AttackBoardId::WKL => 1,
            AttackBoardId::BQL => 2,
            AttackBoardId::BKL => 3,
        }
    }

    /// Nominal owner
    pub fn owner(self) -> Color {
        match self {
            AttackBoardId::WQL | AttackBoardId::WKL => Color::White,
            AttackBoardId::BQL | AttackBoardId::BKL => Color::Black,
        }
    }

    pub fn home_track(self) -> Track {
        match self {
            AttackBoardId::WQL | AttackBoardId::BQL => Track::QL,
            AttackBoardId::WKL | AttackBoardId::BKL => Track::KL,
        }
    }

    pub fn home_pin(self) -> PinId {
        let number = match self.owner() {
            Color::White => WHITE_HOME_PIN,
            Color::Black => BLACK_HOME_PIN,
        };
        PinId::new(self.home_track(), number)
    }

    pub fn of(color: Color, track: Track) -> Self {
        match (color, track) {
            (Color::White, Track::QL) => AttackBoardId::WQL,
            (Color::White, Track::KL) => AttackBoardId::WKL,
            (Color::Black, Track::QL) => AttackBoardId::BQL,
            (Color::Black, Track::KL) => AttackBoardId::BKL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttackBoardId::WQL => "WQL",
            AttackBoardId::WKL => "WKL",
            AttackBoardId::BQL => "BQL",
            AttackBoardId::BKL => "BKL",
        }
    }
}

impl fmt::Display for AttackBoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackBoardId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttackBoardId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParseError::InvalidBoard(s.to_string()))
    }
}

/// Logical board a piece stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Level {
    Main(MainBoard),
    Attack(AttackBoardId),
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Main(board) => f.write_str(board.as_str()),
            Level::Attack(board) => f.write_str(board.as_str()),
        }
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(board) = MainBoard::parse(s) {
            return Ok(Level::Main(board));
        }
        s.parse::<AttackBoardId>()
            .map(Level::Attack)
            .map_err(|_| ParseError::InvalidLevel(s.to_string()))
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.to_string()
    }
}

impl TryFrom<String> for Level {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Physical location of a square: a main board or an attack-board pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolvedLevel {
    Main(MainBoard),
    Pin(PinId),
}

impl ResolvedLevel {
    pub fn level_rank(self) -> u8 {
        match self {
            ResolvedLevel::Main(board) => board.level_rank(),
            ResolvedLevel::Pin(pin) => pin.level_rank(),
        }
    }

    /// Number of levels between two places, attack boards counting half a level
    pub fn distance(self, other: ResolvedLevel) -> u8 {
        (self.level_rank().abs_diff(other.level_rank()) + 1) / 2
    }
}

impl fmt::Display for ResolvedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedLevel::Main(board) => f.write_str(board.as_str()),
            ResolvedLevel::Pin(pin) => write!(f, "{pin}"),
        }
    }
}

impl FromStr for ResolvedLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(board) = MainBoard::parse(s) {
            return Ok(ResolvedLevel::Main(board));
        }
        s.parse::<PinId>()
            .map(ResolvedLevel::Pin)
            .map_err(|_| ParseError::InvalidLevel(s.to_string()))
    }
}

/// Letter for a file index (`0 → 'z'`)
pub fn file_letter(file: u8) -> char {
    FILE_LETTERS.get(file as usize).copied().unwrap_or('?')
}

/// A square of the world: grid coordinate plus the physical level it lives on
///
/// Identified in text as `{fileLetter}{rank}{level}`, e.g. `a4W` or `z0QL1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    pub file: u8,
    pub rank: u8,
    pub level: ResolvedLevel,
}

impl Square {
    pub fn new(file: u8, rank: u8, level: ResolvedLevel) -> Self {
        Square { file, rank, level }
    }

    pub fn main(file: u8, rank: u8, board: MainBoard) -> Self {
        Square::new(file, rank, ResolvedLevel::Main(board))
    }

    pub fn on_pin(file: u8, rank: u8, pin: PinId) -> Self {
        Square::new(file, rank, ResolvedLevel::Pin(pin))
    }

    pub fn coordinate(self) -> (u8, u8) {
        (self.file, self.rank)
    }

    /// Square colour: equal values share a colour
    pub fn color_parity(self) -> u8 {
        (self.file + self.rank) % 2
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", file_letter(self.file), self.rank, self.level)
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(ParseError::Empty)?;
        let file = FILE_LETTERS
            .iter()
            .position(|&c| c == letter)
            .ok_or(ParseError::InvalidFile(letter))? as u8;
        let rest = chars.as_str();
        let rank = rest
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| ParseError::InvalidRank(s.to_string()))? as u8;
        let level = rest[1..].parse()?;
        Ok(Square { file, rank, level })
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u16);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pending promotion carried by a pawn whose promotion square is overhung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionState {
    Deferred,
}

/// A piece on the board
///
/// `file`/`rank` are world grid coordinates; `level` is the logical board.
/// When an attack board moves, its passengers keep their `level` and have
/// `file`/`rank` remapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: PieceId,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
    pub file: u8,
    pub rank: u8,
    pub level: Level,
    pub has_moved: bool,
    #[serde(default)]
    pub moved_as_passenger: bool,
    /// Pawn lost its double step because a board transported it
    #[serde(default, rename = "movedByAB")]
    pub moved_by_ab: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_state: Option<PromotionState>,
}

impl Piece {
    pub fn new(id: u16, kind: PieceKind, color: Color, file: u8, rank: u8, level: Level) -> Self {
        Piece {
            id: PieceId(id),
            kind,
            color,
            file,
            rank,
            level,
            has_moved: false,
            moved_as_passenger: false,
            moved_by_ab: false,
            promotion_state: None,
        }
    }

    pub fn is_aboard(&self, board: AttackBoardId) -> bool {
        self.level == Level::Attack(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_id_round_trip() {
        let square: Square = "a4W".parse().expect("valid square");
        assert_eq!(square, Square::main(1, 4, MainBoard::W));
        assert_eq!(square.to_string(), "a4W");

        let square: Square = "z0QL1".parse().expect("valid square");
        assert_eq!(square, Square::on_pin(0, 0, PinId::new(Track::QL, 1)));
    }

    #[test]
    fn test_square_id_rejects_garbage() {
        assert_eq!("".parse::<Square>(), Err(ParseError::Empty));
        assert_eq!("x4W".parse::<Square>(), Err(ParseError::InvalidFile('x')));
        assert!("a4Q".parse::<Square>().is_err());
        assert!("aW".parse::<Square>().is_err());
        assert!("a4QL7".parse::<Square>().is_err());
    }

    #[test]
    fn test_instance_id_format() {
        let id = InstanceId {
            pin: PinId::new(Track::QL, 2),
            rotation: Rotation::Deg180,
        };
        assert_eq!(id.to_string(), "QL2:180");
        assert_eq!("QL2:180".parse::<InstanceId>(), Ok(id));
        assert!("QL2:90".parse::<InstanceId>().is_err());
    }

    #[test]
    fn test_level_distance_counts_attack_boards_as_half_levels() {
        let w = ResolvedLevel::Main(MainBoard::W);
        let n = ResolvedLevel::Main(MainBoard::N);
        let b = ResolvedLevel::Main(MainBoard::B);
        let ql1 = ResolvedLevel::Pin(PinId::new(Track::QL, 1));
        let ql2 = ResolvedLevel::Pin(PinId::new(Track::QL, 2));

        assert_eq!(w.distance(w), 0);
        assert_eq!(w.distance(ql1), 1);
        assert_eq!(w.distance(n), 1);
        assert_eq!(w.distance(ql2), 2);
        assert_eq!(w.distance(b), 2);
    }

    #[test]
    fn test_piece_serializes_with_camel_case_field_names() {
        let mut pawn = Piece::new(7, PieceKind::Pawn, Color::White, 1, 2, Level::Main(MainBoard::W));
        pawn.moved_by_ab = true;
        let json = serde_json::to_value(pawn).expect("serialize");
        assert_eq!(json["type"], "pawn");
        assert_eq!(json["level"], "W");
        assert_eq!(json["movedByAB"], true);
        assert_eq!(json["hasMoved"], false);
        assert!(json.get("promotionState").is_none());
    }

    #[test]
    fn test_pin_coordinates_follow_track() {
        let ql3 = PinId::new(Track::QL, 3);
        assert_eq!(ql3.coordinates(), [(0, 4), (1, 4), (0, 5), (1, 5)]);
        let kl6 = PinId::new(Track::KL, 6);
        assert!(kl6.contains(5, 9));
        assert!(!kl6.contains(3, 9));
        assert_eq!(kl6.lateral(), PinId::new(Track::QL, 6));
    }
}
