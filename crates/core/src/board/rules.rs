//! Rules delegation
//!
//! All legality questions are answered by shakmaty. Nothing in this module
//! reimplements chess rules; it only translates between the adapter's
//! square-pair vocabulary and shakmaty's move list.

use shakmaty::{
    fen::{Fen, LossyFenError},
    CastlingMode, Chess, Color, EnPassantMode, File, FromSetup, Move, Position, Role, Setup,
    Square,
};

use super::types::MoveRecord;
use crate::error::{Error, Result};

/// Standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Legality oracle consumed by the board adapter.
///
/// Injected as a capability so the adapter can be driven by a fake engine in
/// tests. The adapter treats the engine as authoritative and never inspects
/// positions itself.
pub trait RulesEngine {
    /// Replaces the position. Fails on malformed notation, leaving the
    /// previous position in place.
    fn load(&mut self, notation: &str) -> Result<()>;

    /// Current position as a notation string.
    fn notation(&self) -> String;

    /// Side to move.
    fn turn(&self) -> Color;

    /// Legal moves from one square for the side to move.
    fn moves_from(&self, origin: Square) -> Vec<MoveRecord>;

    /// Legal moves from one square for whichever side owns the piece there,
    /// ignoring turn order.
    fn any_side_moves_from(&self, origin: Square) -> Vec<MoveRecord>;

    /// Plays a move for the side to move, or returns `None` if it is
    /// illegal. The position is untouched on rejection.
    fn apply(&mut self, origin: Square, destination: Square) -> Option<MoveRecord>;

    /// Like [`RulesEngine::apply`], but overrides turn order so either side
    /// may move.
    fn apply_any_side(&mut self, origin: Square, destination: Square) -> Option<MoveRecord>;

    /// Raw square-content edit: lifts whatever sits on `origin` and drops it
    /// on `destination`, replacing any occupant. No legality checks. Returns
    /// `None` only when `origin` is empty.
    fn relocate(&mut self, origin: Square, destination: Square) -> Option<MoveRecord>;
}

/// Production [`RulesEngine`] backed by shakmaty.
pub struct ShakmatyRules {
    setup: Setup,
    /// Legality view of `setup`. `None` after a free edit produced a setup
    /// that is not a legal chess position; moves are unavailable until the
    /// next successful load.
    playable: Option<Chess>,
    /// Exact notation as last loaded or rendered. Stored verbatim so that
    /// `load` followed by `notation` round-trips byte for byte.
    notation: String,
}

impl ShakmatyRules {
    pub fn new() -> Self {
        let pos = Chess::default();
        Self {
            setup: pos.to_setup(EnPassantMode::Legal),
            playable: Some(pos),
            notation: STARTING_FEN.to_string(),
        }
    }

    fn install(&mut self, pos: Chess) {
        self.notation = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
        self.setup = pos.to_setup(EnPassantMode::Legal);
        self.playable = Some(pos);
    }

    /// The same position with the move handed to the other side, when that
    /// still forms a legal position.
    fn flipped(&self) -> Option<Chess> {
        let mut setup = self.setup.clone();
        setup.turn = !setup.turn;
        setup.ep_square = None;
        Chess::from_setup(setup, CastlingMode::Standard)
            .or_else(|e| e.ignore_impossible_check())
            .ok()
    }
}

impl Default for ShakmatyRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyRules {
    fn load(&mut self, notation: &str) -> Result<()> {
        let trimmed = notation.trim();
        let fen: Fen = trimmed
            .parse()
            .map_err(|e| Error::InvalidPosition(format!("{trimmed}: {e}")))?;
        let pos: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| Error::InvalidPosition(format!("{trimmed}: {e}")))?;
        self.setup = pos.to_setup(EnPassantMode::Legal);
        self.playable = Some(pos);
        self.notation = trimmed.to_string();
        Ok(())
    }

    fn notation(&self) -> String {
        self.notation.clone()
    }

    fn turn(&self) -> Color {
        self.setup.turn
    }

    fn moves_from(&self, origin: Square) -> Vec<MoveRecord> {
        self.playable
            .as_ref()
            .map(|pos| records_from(pos, origin))
            .unwrap_or_default()
    }

    fn any_side_moves_from(&self, origin: Square) -> Vec<MoveRecord> {
        let mut moves = self.moves_from(origin);
        if let Some(flipped) = self.flipped() {
            moves.extend(records_from(&flipped, origin));
        }
        moves
    }

    fn apply(&mut self, origin: Square, destination: Square) -> Option<MoveRecord> {
        let pos = self.playable.clone()?;
        let m = find_move(&pos, origin, destination)?;
        let record = record_of(&m, origin, destination);
        let next = pos.play(m).ok()?;
        self.install(next);
        Some(record)
    }

    fn apply_any_side(&mut self, origin: Square, destination: Square) -> Option<MoveRecord> {
        if let Some(record) = self.apply(origin, destination) {
            return Some(record);
        }
        let pos = self.flipped()?;
        let m = find_move(&pos, origin, destination)?;
        let record = record_of(&m, origin, destination);
        let next = pos.play(m).ok()?;
        self.install(next);
        Some(record)
    }

    fn relocate(&mut self, origin: Square, destination: Square) -> Option<MoveRecord> {
        let piece = self.setup.board.piece_at(origin)?;
        let capture = if destination != origin {
            self.setup.board.piece_at(destination).map(|p| p.role)
        } else {
            None
        };

        self.setup.board.discard_piece_at(origin);
        self.setup.board.discard_piece_at(destination);
        self.setup.board.set_piece_at(destination, piece);
        self.setup.ep_square = None;
        // Stale rights would make the edited setup unreadable.
        self.setup.castling_rights &= self.setup.board.rooks();

        self.playable = Chess::from_setup(self.setup.clone(), CastlingMode::Standard)
            .or_else(|e| e.ignore_impossible_check())
            .or_else(|e| e.ignore_too_much_material())
            .ok();
        self.notation = Fen::try_from_setup(self.setup.clone())
            .unwrap_or_else(LossyFenError::ignore)
            .to_string();

        Some(MoveRecord {
            origin,
            destination,
            role: piece.role,
            capture,
            promotion: None,
        })
    }
}

/// Destination as the user drags it. Castling is the king's two-square hop,
/// not shakmaty's internal king-takes-rook encoding.
fn drag_target(m: &Move) -> Square {
    match *m {
        Move::Castle { king, rook } => {
            let file = if rook > king { File::G } else { File::C };
            Square::from_coords(file, king.rank())
        }
        _ => m.to(),
    }
}

fn find_move(pos: &Chess, origin: Square, destination: Square) -> Option<Move> {
    let mut candidates: Vec<Move> = pos
        .legal_moves()
        .into_iter()
        .filter(|m| m.from() == Some(origin) && drag_target(m) == destination)
        .collect();
    if candidates.len() > 1 {
        // A bare square pair cannot express an underpromotion.
        candidates.retain(|m| m.promotion().map_or(true, |role| role == Role::Queen));
    }
    candidates.into_iter().next()
}

fn record_of(m: &Move, origin: Square, destination: Square) -> MoveRecord {
    MoveRecord {
        origin,
        destination,
        role: m.role(),
        capture: m.capture(),
        promotion: m.promotion(),
    }
}

fn records_from(pos: &Chess, origin: Square) -> Vec<MoveRecord> {
    pos.legal_moves()
        .into_iter()
        .filter(|m| m.from() == Some(origin))
        .map(|m| record_of(&m, origin, drag_target(&m)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Role, Square};

    #[test]
    fn starting_pawn_has_two_destinations() {
        let rules = ShakmatyRules::new();
        let moves = rules.moves_from(Square::E2);
        let mut dests: Vec<Square> = moves.iter().map(|m| m.destination).collect();
        dests.sort();
        assert_eq!(dests, vec![Square::E3, Square::E4]);
        assert_eq!(rules.turn(), Color::White);
    }

    #[test]
    fn illegal_move_is_rejected_without_mutation() {
        let mut rules = ShakmatyRules::new();
        assert!(rules.apply(Square::E2, Square::E5).is_none());
        assert_eq!(rules.notation(), STARTING_FEN);
    }

    #[test]
    fn legal_move_flips_the_turn() {
        let mut rules = ShakmatyRules::new();
        let record = rules.apply(Square::E2, Square::E4).unwrap();
        assert_eq!(record.role, Role::Pawn);
        assert_eq!(record.capture, None);
        assert_eq!(rules.turn(), Color::Black);
    }

    #[test]
    fn notation_round_trips_exactly() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        let mut rules = ShakmatyRules::new();
        rules.load(fen).unwrap();
        assert_eq!(rules.notation(), fen);
    }

    #[test]
    fn malformed_notation_is_rejected() {
        let mut rules = ShakmatyRules::new();
        let err = rules.load("definitely not a position").unwrap_err();
        assert!(matches!(err, Error::InvalidPosition(_)));
        assert_eq!(rules.notation(), STARTING_FEN);
    }

    #[test]
    fn castling_is_the_kings_two_square_drag() {
        let mut rules = ShakmatyRules::new();
        rules.load("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        let mut dests: Vec<Square> = rules
            .moves_from(Square::E1)
            .iter()
            .map(|m| m.destination)
            .collect();
        dests.sort();
        assert!(dests.contains(&Square::G1));
        assert!(dests.contains(&Square::C1));

        let record = rules.apply(Square::E1, Square::G1).unwrap();
        assert_eq!(record.role, Role::King);
        // King on g1, rook on f1.
        assert!(rules.notation().starts_with("r3k2r/8/8/8/8/8/8/R4RK1"));
    }

    #[test]
    fn bare_promotion_selects_a_queen() {
        let mut rules = ShakmatyRules::new();
        rules.load("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let record = rules.apply(Square::A7, Square::A8).unwrap();
        assert_eq!(record.promotion, Some(Role::Queen));
    }

    #[test]
    fn any_side_moves_cover_both_colors() {
        let rules = ShakmatyRules::new();
        assert!(!rules.any_side_moves_from(Square::E2).is_empty());
        assert!(!rules.any_side_moves_from(Square::E7).is_empty());
        // Turn-constrained view only sees white at the start.
        assert!(rules.moves_from(Square::E7).is_empty());
    }

    #[test]
    fn any_side_apply_lets_white_move_twice() {
        let mut rules = ShakmatyRules::new();
        assert!(rules.apply_any_side(Square::E2, Square::E4).is_some());
        assert!(rules.apply_any_side(Square::D2, Square::D4).is_some());
    }

    #[test]
    fn relocate_moves_content_without_legality() {
        let mut rules = ShakmatyRules::new();
        let record = rules.relocate(Square::E2, Square::E5).unwrap();
        assert_eq!(record.role, Role::Pawn);
        assert_eq!(record.capture, None);
        assert_eq!(
            rules.notation(),
            "rnbqkbnr/pppppppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1"
        );
        // No turn flip in a raw edit.
        assert_eq!(rules.turn(), Color::White);
    }

    #[test]
    fn relocate_from_empty_square_is_the_sentinel() {
        let mut rules = ShakmatyRules::new();
        assert!(rules.relocate(Square::E4, Square::E5).is_none());
        assert_eq!(rules.notation(), STARTING_FEN);
    }

    #[test]
    fn relocated_notation_reloads_cleanly() {
        let mut rules = ShakmatyRules::new();
        rules.relocate(Square::E2, Square::E5).unwrap();
        let fen = rules.notation();

        // The rendered setup notation is itself a loadable position.
        let mut fresh = ShakmatyRules::new();
        fresh.load(&fen).unwrap();
        assert_eq!(fresh.notation(), fen);
        assert!(!fresh.moves_from(Square::E5).is_empty());
    }

    #[test]
    fn relocate_can_leave_an_unplayable_setup() {
        let mut rules = ShakmatyRules::new();
        // Queen onto the own king: no longer a legal chess position.
        rules.relocate(Square::D1, Square::E1).unwrap();
        assert!(rules.moves_from(Square::E2).is_empty());
        // A fresh load restores legality.
        rules.load(STARTING_FEN).unwrap();
        assert!(!rules.moves_from(Square::E2).is_empty());
    }
}
