// Board representation and move application
// Using a flat Mailbox (64-cell array) so a Position is a cheap value copy

use std::fmt;
use std::str::FromStr;

use crate::error::MoveError;
use crate::square::Square;

// =============================================================================
// Type Definitions
// =============================================================================

/// Color of a piece or side to move
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks at the start
    pub fn back_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    /// Rank this color's pawns start on
    pub fn pawn_rank(&self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    /// Rank this color's pawns promote on
    pub fn promotion_rank(&self) -> u8 {
        self.opposite().back_rank()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Type of a chess piece
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The four kinds a pawn may promote to, strongest first
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Lowercase FEN letter
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a FEN letter in either case
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Whether a pawn may become this piece
    pub fn is_promotion_choice(&self) -> bool {
        PieceKind::PROMOTIONS.contains(self)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board. Plain data: all behaviour lives in the move generator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    /// Once true, never false again
    pub has_moved: bool,
}

impl Piece {
    /// Create an unmoved piece
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    /// FEN letter: uppercase for white, lowercase for black
    pub fn symbol(&self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// Which rook a king castles with
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// File the rook starts on
    pub fn rook_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 8,
            CastleSide::Queenside => 1,
        }
    }

    /// File the king lands on (g or c)
    pub fn king_target_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 3,
        }
    }

    /// File the rook lands on (f or d)
    pub fn rook_target_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 4,
        }
    }
}

/// File both kings start on
pub const KING_FILE: u8 = 5;

/// Castling availability, the FEN "KQkq" field
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        CastlingRights::default()
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    /// Remove a right. Rights are never granted back.
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside = false,
            (Color::White, CastleSide::Queenside) => self.white_queenside = false,
            (Color::Black, CastleSide::Kingside) => self.black_kingside = false,
            (Color::Black, CastleSide::Queenside) => self.black_queenside = false,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CastlingRights::none()
    }
}

/// Represents a move request: the piece on `from` goes to `to`
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Piece a pawn becomes on the last rank
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveError;

    /// Parse "fromto" notation with an optional promotion letter ("e2e4", "e7e8q")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = || MoveError::Notation(s.to_string());
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(notation());
        }
        let from: Square = s[0..2].parse().map_err(|_| notation())?;
        let to: Square = s[2..4].parse().map_err(|_| notation())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some(kind) if kind.is_promotion_choice() => Some(kind),
                _ => return Err(notation()),
            },
        };
        Ok(Move { from, to, promotion })
    }
}

/// What applying a move did to the board, beyond moving one piece
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MoveEffects {
    /// The moving piece as it was before the move
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castled: Option<CastleSide>,
    pub en_passant: bool,
    /// Pawn reached the last rank without a promotion choice
    pub promotion_pending: bool,
}

/// The part of a position compared for threefold repetition:
/// placement, side to move and castling rights
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Snapshot {
    cells: [Option<(PieceKind, Color)>; 64],
    side_to_move: Color,
    castling: CastlingRights,
}

// =============================================================================
// Position Structure
// =============================================================================

/// The six FEN fields of a chess position
///
/// The board is a flat array indexed by `Square::index()`. `Position` is `Copy`:
/// simulating a move means copying 64 cells, never sharing them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub(crate) cells: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// Create an empty board, white to move, no castling rights
    pub fn empty() -> Self {
        Position {
            cells: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Standard starting position
    pub fn starting() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for color in [Color::White, Color::Black] {
            for (i, kind) in back_rank.iter().enumerate() {
                let file = i as u8 + 1;
                if let Some(sq) = Square::new(file, color.back_rank()) {
                    position.set_piece(sq, Some(Piece::new(*kind, color, sq)));
                }
                if let Some(sq) = Square::new(file, color.pawn_rank()) {
                    position.set_piece(sq, Some(Piece::new(PieceKind::Pawn, color, sq)));
                }
            }
        }

        position.castling = CastlingRights::all();
        position
    }

    /// Get the piece at a given square
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    /// Put a piece on (or clear) a square. The piece's own square is kept in sync.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.index()] = piece.map(|mut p| {
            p.square = square;
            p
        });
    }

    /// Every piece on the board, in square index order
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().filter_map(|cell| *cell)
    }

    /// Every piece of one color
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant = target;
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Repetition key of this position
    pub fn snapshot(&self) -> Snapshot {
        let mut cells = [None; 64];
        for (slot, cell) in cells.iter_mut().zip(self.cells.iter()) {
            *slot = cell.map(|p| (p.kind, p.color));
        }
        Snapshot {
            cells,
            side_to_move: self.side_to_move,
            castling: self.castling,
        }
    }

    /// Execute a move without checking legality
    ///
    /// Handles the castling rook jump, en passant removal, promotion, clocks,
    /// castling-right revocation and the en passant target. The caller is
    /// responsible for only passing moves from the legal set.
    pub fn apply(&mut self, mv: Move) -> Result<MoveEffects, MoveError> {
        let piece = self
            .piece_at(mv.from)
            .ok_or(MoveError::NoPieceAtSquare(mv.from))?;
        let color = piece.color;
        let mut captured = self.piece_at(mv.to);
        let mut castled = None;
        let mut en_passant = false;

        // Castling: the king moves two files, the rook jumps over it
        let file_distance = (mv.to.file() as i8 - mv.from.file() as i8).abs();
        if piece.kind == PieceKind::King && file_distance == 2 {
            let side = if mv.to.file() > mv.from.file() {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            };
            let rank = mv.from.rank();
            if let (Some(rook_from), Some(rook_to)) = (
                Square::new(side.rook_file(), rank),
                Square::new(side.rook_target_file(), rank),
            ) {
                if let Some(mut rook) = self.piece_at(rook_from) {
                    rook.has_moved = true;
                    self.set_piece(rook_from, None);
                    self.set_piece(rook_to, Some(rook));
                }
            }
            castled = Some(side);
        }

        // En passant: diagonal pawn move onto the empty target square
        if piece.kind == PieceKind::Pawn
            && captured.is_none()
            && mv.from.file() != mv.to.file()
            && self.en_passant == Some(mv.to)
        {
            if let Some(victim_sq) = Square::new(mv.to.file(), mv.from.rank()) {
                captured = self.piece_at(victim_sq);
                self.set_piece(victim_sq, None);
                en_passant = true;
            }
        }

        // Move the piece itself
        let mut moved = piece;
        moved.has_moved = true;
        let mut promotion_pending = false;
        if piece.kind == PieceKind::Pawn && mv.to.rank() == color.promotion_rank() {
            match mv.promotion {
                Some(kind) => moved.kind = kind,
                None => promotion_pending = true,
            }
        }
        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(moved));

        // Clocks
        if piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        // Counters come from FEN text and may already sit at the top of the range
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        // Only a two-square pawn advance leaves an en passant target behind
        self.en_passant = None;
        if piece.kind == PieceKind::Pawn && (mv.to.rank() as i8 - mv.from.rank() as i8).abs() == 2 {
            self.en_passant = Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2);
        }

        self.revoke_lost_castling_rights();
        self.side_to_move = color.opposite();

        Ok(MoveEffects {
            piece,
            captured,
            castled,
            en_passant,
            promotion_pending,
        })
    }

    /// Replace the pawn waiting on its last rank with the chosen piece
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<(), MoveError> {
        if !kind.is_promotion_choice() {
            return Err(MoveError::InvalidPromotion(kind.to_string()));
        }
        match self.piece_at(square) {
            Some(mut pawn) if pawn.kind == PieceKind::Pawn => {
                pawn.kind = kind;
                self.set_piece(square, Some(pawn));
                Ok(())
            }
            _ => Err(MoveError::NoPromotionPending),
        }
    }

    /// Drop every right whose king or rook is no longer an unmoved piece on its home square
    fn revoke_lost_castling_rights(&mut self) {
        for color in [Color::White, Color::Black] {
            let king_ok = self.is_unmoved_at_home(color, KING_FILE, PieceKind::King);

            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                let rook_ok = self.is_unmoved_at_home(color, side.rook_file(), PieceKind::Rook);
                if !king_ok || !rook_ok {
                    self.castling.revoke(color, side);
                }
            }
        }
    }

    /// Whether an unmoved `kind` of `color` stands on `file` of its back rank
    pub(crate) fn is_unmoved_at_home(&self, color: Color, file: u8, kind: PieceKind) -> bool {
        matches!(
            Square::new(file, color.back_rank()).and_then(|sq| self.piece_at(sq)),
            Some(p) if p.kind == kind && p.color == color && !p.has_moved
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting()
    }
}

// =============================================================================
// Display Implementation (for debugging)
// =============================================================================

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        writeln!(f, "  +-+-+-+-+-+-+-+")?;

        for rank in (1..=8u8).rev() {
            write!(f, "{} ", rank)?;

            for file in 1..=8u8 {
                let piece_char = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map(|p| p.symbol())
                    .unwrap_or('.');
                write!(f, "{} ", piece_char)?;
            }
            writeln!(f, "| {}", rank)?;
        }

        writeln!(f, "  +-+-+-+-+-+-+-+")?;
        writeln!(f, "  a b c d e f g h")?;
        writeln!(f)?;
        writeln!(f, "Side to move: {}", self.side_to_move)?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should parse")
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.promotion_rank(), 8);
        assert_eq!(Color::Black.promotion_rank(), 1);
    }

    #[test]
    fn test_piece_symbols() {
        let white_queen = Piece::new(PieceKind::Queen, Color::White, sq("d1"));
        let black_knight = Piece::new(PieceKind::Knight, Color::Black, sq("b8"));
        assert_eq!(white_queen.symbol(), 'Q');
        assert_eq!(black_knight.symbol(), 'n');
        assert!(!white_queen.has_moved);
    }

    #[test]
    fn test_board_empty() {
        let position = Position::empty();
        for square in Square::all() {
            assert_eq!(position.piece_at(square), None);
        }
        assert_eq!(position.side_to_move(), Color::White);
        assert!(position.castling_rights().is_empty());
    }

    #[test]
    fn test_starting_position() {
        let position = Position::starting();
        assert_eq!(position.pieces().count(), 32);
        assert_eq!(position.pieces_of(Color::White).count(), 16);

        let king = position.piece_at(sq("e1")).expect("white king on e1");
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(king.color, Color::White);
        assert_eq!(king.square, sq("e1"));

        let queen = position.piece_at(sq("d8")).expect("black queen on d8");
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::Black);
        assert_eq!(position.castling_rights(), CastlingRights::all());
    }

    #[test]
    fn test_set_piece_tracks_square() {
        let mut position = Position::empty();
        let rook = Piece::new(PieceKind::Rook, Color::White, sq("a1"));
        position.set_piece(sq("d4"), Some(rook));
        assert_eq!(position.piece_at(sq("d4")).map(|p| p.square), Some(sq("d4")));

        position.set_piece(sq("d4"), None);
        assert_eq!(position.piece_at(sq("d4")), None);
    }

    #[test]
    fn test_move_notation() {
        let mv: Move = "e2e4".parse().unwrap();
        assert_eq!(mv, Move::new(sq("e2"), sq("e4")));
        assert_eq!(mv.to_string(), "e2e4");

        let promo: Move = "e7e8q".parse().unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        assert_eq!(promo.to_string(), "e7e8q");

        assert!("e7e8k".parse::<Move>().is_err(), "cannot promote to a king");
        assert!("e2".parse::<Move>().is_err());
        assert!("e2e9".parse::<Move>().is_err());
    }

    #[test]
    fn test_apply_quiet_move() {
        let mut position = Position::starting();
        let effects = position.apply(Move::new(sq("g1"), sq("f3"))).unwrap();

        assert_eq!(effects.captured, None);
        assert_eq!(position.piece_at(sq("g1")), None);
        let knight = position.piece_at(sq("f3")).expect("knight on f3");
        assert!(knight.has_moved);
        assert_eq!(position.halfmove_clock(), 1);
        assert_eq!(position.fullmove_number(), 1);
        assert_eq!(position.side_to_move(), Color::Black);
    }

    #[test]
    fn test_apply_clocks_stop_at_the_top_of_the_range() {
        let mut position = Position::starting();
        position.halfmove_clock = u32::MAX;
        position.fullmove_number = u32::MAX;
        position.apply(Move::new(sq("g1"), sq("f3"))).unwrap();
        position.apply(Move::new(sq("g8"), sq("f6"))).unwrap();
        assert_eq!(position.halfmove_clock(), u32::MAX, "Halfmove clock should saturate");
        assert_eq!(position.fullmove_number(), u32::MAX, "Fullmove number should saturate");
    }

    #[test]
    fn test_apply_double_push_sets_en_passant() {
        let mut position = Position::starting();
        position.apply(Move::new(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(position.en_passant_target(), Some(sq("e3")));
        assert_eq!(position.halfmove_clock(), 0);

        position.apply(Move::new(sq("g8"), sq("f6"))).unwrap();
        assert_eq!(position.en_passant_target(), None, "cleared after the next move");
        assert_eq!(position.fullmove_number(), 2);
    }

    #[test]
    fn test_apply_castling_moves_rook() {
        let mut position = Position::empty();
        position.set_piece(sq("e1"), Some(Piece::new(PieceKind::King, Color::White, sq("e1"))));
        position.set_piece(sq("h1"), Some(Piece::new(PieceKind::Rook, Color::White, sq("h1"))));
        position.set_piece(sq("e8"), Some(Piece::new(PieceKind::King, Color::Black, sq("e8"))));
        position.set_castling_rights(CastlingRights::all());

        let effects = position.apply(Move::new(sq("e1"), sq("g1"))).unwrap();
        assert_eq!(effects.castled, Some(CastleSide::Kingside));
        assert_eq!(position.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert_eq!(position.piece_at(sq("h1")), None);
        assert!(!position.castling_rights().white_kingside);
        assert!(!position.castling_rights().white_queenside);
    }

    #[test]
    fn test_apply_capture_revokes_rook_right() {
        let mut position = Position::empty();
        position.set_piece(sq("e1"), Some(Piece::new(PieceKind::King, Color::White, sq("e1"))));
        position.set_piece(sq("e8"), Some(Piece::new(PieceKind::King, Color::Black, sq("e8"))));
        position.set_piece(sq("h8"), Some(Piece::new(PieceKind::Rook, Color::Black, sq("h8"))));
        position.set_piece(sq("a8"), Some(Piece::new(PieceKind::Rook, Color::Black, sq("a8"))));
        position.set_piece(sq("h1"), Some(Piece::new(PieceKind::Rook, Color::White, sq("h1"))));
        position.set_castling_rights(CastlingRights {
            white_kingside: true,
            white_queenside: false,
            black_kingside: true,
            black_queenside: true,
        });

        let effects = position.apply(Move::new(sq("h1"), sq("h8"))).unwrap();
        assert_eq!(effects.captured.map(|p| p.kind), Some(PieceKind::Rook));
        let rights = position.castling_rights();
        assert!(!rights.white_kingside, "white rook left h1");
        assert!(!rights.black_kingside, "black rook captured on h8");
        assert!(rights.black_queenside);
    }

    #[test]
    fn test_apply_promotion() {
        let mut position = Position::empty();
        position.set_piece(sq("a7"), Some(Piece::new(PieceKind::Pawn, Color::White, sq("a7"))));

        let mut pending = position;
        let effects = pending.apply(Move::new(sq("a7"), sq("a8"))).unwrap();
        assert!(effects.promotion_pending);
        assert_eq!(pending.piece_at(sq("a8")).map(|p| p.kind), Some(PieceKind::Pawn));
        pending.promote(sq("a8"), PieceKind::Knight).unwrap();
        assert_eq!(pending.piece_at(sq("a8")).map(|p| p.kind), Some(PieceKind::Knight));

        let effects = position
            .apply(Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Queen))
            .unwrap();
        assert!(!effects.promotion_pending);
        assert_eq!(position.piece_at(sq("a8")).map(|p| p.kind), Some(PieceKind::Queen));
    }

    #[test]
    fn test_apply_from_empty_square() {
        let mut position = Position::starting();
        let result = position.apply(Move::new(sq("e4"), sq("e5")));
        assert_eq!(result, Err(MoveError::NoPieceAtSquare(sq("e4"))));
    }

    #[test]
    fn test_snapshot_ignores_clocks() {
        let mut a = Position::starting();
        let b = Position::starting();
        a.set_halfmove_clock(12);
        assert_eq!(a.snapshot(), b.snapshot());

        a.set_side_to_move(Color::Black);
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_board_display() {
        let display = format!("{}", Position::starting());
        assert!(display.contains("a b c d e f g h"));
        assert!(display.contains("r n b q k b n r"));
        assert!(display.contains("R N B Q K B N R"));
        assert!(display.contains("Side to move: white"));
    }
}
