use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::state::Position;
use super::types::{CastlingRights, Color, Move, Piece, PieceKind, Square};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// The halfmove clock and fullmove number may be omitted and default to
    /// 0 and 1. The result is validated like a builder-made position.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut position = Position::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file: usize = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let sq = u8::try_from(file)
                    .ok()
                    .and_then(|f| Square::new(f, rank))
                    .ok_or(FenError::WrongFileCount {
                        rank: rank_idx,
                        files: file + 1,
                    })?;
                position.put(sq, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::WrongFileCount {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        position.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        for c in parts[2].chars() {
            match c {
                'K' => castling.set(Color::White, true),
                'Q' => castling.set(Color::White, false),
                'k' => castling.set(Color::Black, true),
                'q' => castling.set(Color::Black, false),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }
        position.castling = castling;

        position.en_passant = match parts[3] {
            "-" => None,
            text => {
                let sq: Square = text.parse().map_err(|_| FenError::InvalidEnPassant {
                    found: text.to_string(),
                })?;
                if sq.rank() != 2 && sq.rank() != 5 {
                    return Err(FenError::InvalidEnPassant {
                        found: text.to_string(),
                    });
                }
                Some(sq)
            }
        };

        if let Some(text) = parts.get(4) {
            position.halfmove_clock = parse_counter(text)?;
        }
        if let Some(text) = parts.get(5) {
            position.fullmove_number = parse_counter(text)?.max(1);
        }

        position.validate()?;
        position.hash = position.compute_hash();
        Ok(position)
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let piece = Square::new(file, rank).and_then(|sq| self.piece_at(sq));
                if let Some(piece) = piece {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in coordinate notation (e.g., "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move, or an error describing why parsing failed.
    ///
    /// # Example
    /// ```
    /// use chess_session::board::Position;
    ///
    /// let position = Position::new();
    /// let mv = position.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let len = text.chars().count();
        if !(4..=5).contains(&len) || !text.is_ascii() {
            return Err(MoveParseError::InvalidLength { len });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => {
                    Some(kind)
                }
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.find_move(from, to, promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }
}

fn parse_counter(text: &str) -> Result<u32, FenError> {
    text.parse().map_err(|_| FenError::InvalidCounter {
        found: text.to_string(),
    })
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}
