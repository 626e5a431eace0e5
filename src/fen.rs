// FEN (Forsyth-Edwards Notation) codec
// The only accepted input format for positions, and what the game reports after every move

use crate::board::{CastlingRights, Color, Piece, PieceKind, Position};
use crate::error::FenError;
use crate::square::Square;

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling letters in the only order FEN allows them
const CASTLING_ORDER: [char; 4] = ['K', 'Q', 'k', 'q'];

/// Parse a FEN string into a Position
///
/// Nothing is built unless every one of the six fields is valid.
pub fn parse(text: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = text.trim().split(' ').collect();
    if fields.len() != 6 {
        return Err(FenError::FieldCount(fields.len()));
    }

    let mut position = Position::empty();
    parse_placement(fields[0], &mut position)?;

    position.side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::ActiveColor(other.to_string())),
    };
    position.castling = parse_castling(fields[2])?;
    position.en_passant = match fields[3] {
        "-" => None,
        text => Some(
            text.parse::<Square>()
                .map_err(|_| FenError::EnPassant(text.to_string()))?,
        ),
    };
    position.halfmove_clock =
        parse_counter(fields[4]).ok_or_else(|| FenError::HalfmoveClock(fields[4].to_string()))?;
    position.fullmove_number =
        parse_counter(fields[5]).ok_or_else(|| FenError::FullmoveNumber(fields[5].to_string()))?;

    Ok(position)
}

/// Serialize a Position back to FEN
pub fn serialize(position: &Position) -> String {
    let mut placement = String::with_capacity(64);
    for rank in (1..=8u8).rev() {
        let mut empty = 0;
        for file in 1..=8u8 {
            match Square::new(file, rank).and_then(|sq| position.piece_at(sq)) {
                Some(piece) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push(piece.symbol());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if rank != 1 {
            placement.push('/');
        }
    }

    let side = match position.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = position
        .en_passant
        .map(|sq| sq.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{} {} {} {} {} {}",
        placement,
        side,
        castling_field(&position.castling),
        en_passant,
        position.halfmove_clock,
        position.fullmove_number
    )
}

/// Field 1: eight rank groups, rank 8 first
fn parse_placement(field: &str, position: &mut Position) -> Result<(), FenError> {
    let groups: Vec<&str> = field.split('/').collect();
    if groups.len() != 8 {
        return Err(FenError::RankCount(groups.len()));
    }
    if groups.iter().any(|g| g.is_empty()) {
        return Err(FenError::EmptyRank);
    }

    for (i, group) in groups.iter().enumerate() {
        let rank = 8 - i as u8;
        let mut files: u32 = 0;

        for c in group.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FenError::InvalidDigit(c));
                }
                files += run;
            } else {
                let kind = PieceKind::from_letter(c).ok_or(FenError::InvalidPiece(c))?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                files += 1;
                let square = u8::try_from(files)
                    .ok()
                    .and_then(|file| Square::new(file, rank))
                    .ok_or(FenError::RankWidth { rank, files })?;
                position.set_piece(square, Some(Piece::new(kind, color, square)));
            }
        }

        if files != 8 {
            return Err(FenError::RankWidth { rank, files });
        }
    }

    for color in [Color::White, Color::Black] {
        let count = position
            .pieces_of(color)
            .filter(|p| p.kind == PieceKind::King)
            .count();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    Ok(())
}

/// Field 3: "-" or a non-empty, in-order subset of "KQkq"
fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let invalid = || FenError::Castling(field.to_string());
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    if field.is_empty() {
        return Err(invalid());
    }

    let mut next = 0;
    for c in field.chars() {
        let pos = CASTLING_ORDER[next..]
            .iter()
            .position(|&allowed| allowed == c)
            .ok_or_else(invalid)?;
        next += pos + 1;
        match c {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            _ => rights.black_queenside = true,
        }
    }
    Ok(rights)
}

fn castling_field(rights: &CastlingRights) -> String {
    let flags = [
        rights.white_kingside,
        rights.white_queenside,
        rights.black_kingside,
        rights.black_queenside,
    ];
    let field: String = CASTLING_ORDER
        .iter()
        .zip(flags)
        .filter(|(_, set)| *set)
        .map(|(c, _)| *c)
        .collect();
    if field.is_empty() {
        "-".to_string()
    } else {
        field
    }
}

/// Fields 5 and 6: plain digits only (no sign)
fn parse_counter(field: &str) -> Option<u32> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
