//! Board interaction adapter
//!
//! Glue between the rules delegate and the rendering surface. The adapter
//! owns both exclusively, keeps the displayed position converged with the
//! authoritative one after every mutation, and funnels every move attempt
//! through one code path regardless of whether it came from a caller command
//! or from a user drag reported by the renderer host.

use shakmaty::{Color, Square};

use super::rules::{RulesEngine, STARTING_FEN};
use super::types::{BoardConfig, BoardMode, DestinationMap, InteractionPolicy, MoveRecord};
use crate::error::{Error, Result};

/// Visual board collaborator. Accepts whole configurations and releases its
/// resources on `destroy`; the adapter never reads state back from it.
pub trait BoardRenderer {
    fn push(&mut self, config: &BoardConfig);
    fn destroy(&mut self);
}

pub struct BoardAdapter<E: RulesEngine, R: BoardRenderer> {
    engine: E,
    renderer: R,
    mode: BoardMode,
    last_move: Option<(Square, Square)>,
    disposed: bool,
}

impl<E: RulesEngine, R: BoardRenderer> BoardAdapter<E, R> {
    /// Takes ownership of an engine and a renderer and pushes the initial
    /// configuration. The mode stays fixed for this instance; switching mode
    /// means building a new adapter, which re-initializes the renderer.
    pub fn new(engine: E, renderer: R, mode: BoardMode) -> Self {
        let mut adapter = Self {
            engine,
            renderer,
            mode,
            last_move: None,
            disposed: false,
        };
        adapter.reconcile();
        adapter
    }

    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    /// Current position as a notation string.
    pub fn position(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.engine.notation())
    }

    /// Origin and destination of the most recently applied move, if any.
    pub fn last_move(&self) -> Result<Option<(Square, Square)>> {
        self.ensure_live()?;
        Ok(self.last_move)
    }

    /// Replaces the position. On malformed notation nothing changes; on
    /// success the highlight is cleared and the renderer updated.
    pub fn set_position(&mut self, notation: &str) -> Result<()> {
        self.ensure_live()?;
        self.engine.load(notation)?;
        self.last_move = None;
        self.reconcile();
        Ok(())
    }

    /// Back to the standard starting position.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.engine.load(STARTING_FEN)?;
        self.last_move = None;
        self.reconcile();
        Ok(())
    }

    /// The one code path for "a move happened". Caller commands and
    /// renderer-reported drags both land here and get identical treatment.
    ///
    /// Returns `Ok(None)` when the attempt is rejected. Rejection changes
    /// nothing and pushes nothing; acceptance mutates the position, records
    /// the highlight and reconciles the renderer as a single step.
    pub fn apply_move(
        &mut self,
        origin: Square,
        destination: Square,
    ) -> Result<Option<MoveRecord>> {
        self.ensure_live()?;
        let record = match self.mode {
            BoardMode::Play => self.engine.apply(origin, destination),
            BoardMode::Analysis => self.engine.apply_any_side(origin, destination),
            BoardMode::BoardEdit => self.engine.relocate(origin, destination),
        };
        if let Some(record) = record {
            self.last_move = Some((origin, destination));
            self.reconcile();
            return Ok(Some(record));
        }
        Ok(None)
    }

    /// Move descriptors for the side to move (play), for both sides
    /// (analysis), or nothing at all (board edit).
    pub fn legal_moves(&self) -> Result<Vec<MoveRecord>> {
        self.ensure_live()?;
        let moves = match self.mode {
            BoardMode::Play => Square::ALL
                .iter()
                .flat_map(|sq| self.engine.moves_from(*sq))
                .collect(),
            BoardMode::Analysis => Square::ALL
                .iter()
                .flat_map(|sq| self.engine.any_side_moves_from(*sq))
                .collect(),
            BoardMode::BoardEdit => Vec::new(),
        };
        Ok(moves)
    }

    /// Per-square destination lookup as currently shown by the renderer.
    pub fn legal_destinations(&self) -> Result<DestinationMap> {
        self.ensure_live()?;
        Ok(match self.mode {
            BoardMode::Play => self.destinations(false),
            BoardMode::Analysis => self.destinations(true),
            BoardMode::BoardEdit => DestinationMap::new(),
        })
    }

    /// Releases the renderer synchronously. Every later operation fails with
    /// [`Error::Disposed`].
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.renderer.destroy();
            self.disposed = true;
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            Err(Error::Disposed)
        } else {
            Ok(())
        }
    }

    /// Full 64-square scan, one engine query per square. The board is fixed
    /// and small; nothing incremental is needed here.
    fn destinations(&self, any_side: bool) -> DestinationMap {
        let mut dests = DestinationMap::new();
        for sq in Square::ALL {
            let moves = if any_side {
                self.engine.any_side_moves_from(sq)
            } else {
                self.engine.moves_from(sq)
            };
            if moves.is_empty() {
                continue;
            }
            let mut targets: Vec<Square> = moves.iter().map(|m| m.destination).collect();
            targets.sort();
            targets.dedup();
            dests.insert(sq, targets);
        }
        dests
    }

    /// Recomputes derived display state and pushes it into the renderer as
    /// one configuration update. Never pushes a partial view.
    fn reconcile(&mut self) {
        let interaction = match self.mode {
            BoardMode::Play => InteractionPolicy::SideToMove {
                side: self.engine.turn(),
                dests: self.destinations(false),
            },
            BoardMode::Analysis => InteractionPolicy::EitherSide {
                dests: self.destinations(true),
            },
            BoardMode::BoardEdit => InteractionPolicy::Free,
        };
        let config = BoardConfig {
            position: self.engine.notation(),
            orientation: Color::White,
            interaction,
            last_move: self.last_move,
        };
        self.renderer.push(&config);
    }
}

impl<E: RulesEngine, R: BoardRenderer> Drop for BoardAdapter<E, R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::rules::ShakmatyRules;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Surface {
        configs: Vec<BoardConfig>,
        destroyed: bool,
    }

    #[derive(Clone, Default)]
    struct RecordingRenderer {
        surface: Rc<RefCell<Surface>>,
    }

    impl BoardRenderer for RecordingRenderer {
        fn push(&mut self, config: &BoardConfig) {
            self.surface.borrow_mut().configs.push(config.clone());
        }

        fn destroy(&mut self) {
            self.surface.borrow_mut().destroyed = true;
        }
    }

    fn adapter(
        mode: BoardMode,
    ) -> (
        BoardAdapter<ShakmatyRules, RecordingRenderer>,
        Rc<RefCell<Surface>>,
    ) {
        let renderer = RecordingRenderer::default();
        let surface = renderer.surface.clone();
        (
            BoardAdapter::new(ShakmatyRules::new(), renderer, mode),
            surface,
        )
    }

    fn last_config(surface: &Rc<RefCell<Surface>>) -> BoardConfig {
        surface.borrow().configs.last().cloned().unwrap()
    }

    #[test]
    fn construction_pushes_the_starting_configuration() {
        let (board, surface) = adapter(BoardMode::Play);
        assert_eq!(surface.borrow().configs.len(), 1);

        let config = last_config(&surface);
        assert_eq!(config.position, STARTING_FEN);
        assert_eq!(config.last_move, None);
        match config.interaction {
            InteractionPolicy::SideToMove { side, ref dests } => {
                assert_eq!(side, Color::White);
                assert_eq!(dests[&Square::E2], vec![Square::E3, Square::E4]);
                assert!(!dests.contains_key(&Square::E7));
            }
            other => panic!("unexpected policy: {other:?}"),
        }
        assert_eq!(board.legal_moves().unwrap().len(), 20);
    }

    #[test]
    fn accepted_play_move_flips_the_turn() {
        let (mut board, surface) = adapter(BoardMode::Play);
        let record = board.apply_move(Square::E2, Square::E4).unwrap().unwrap();
        assert_eq!(record.origin, Square::E2);
        assert_eq!(record.destination, Square::E4);
        assert_eq!(
            board.last_move().unwrap(),
            Some((Square::E2, Square::E4))
        );

        let config = last_config(&surface);
        assert_eq!(config.position, board.position().unwrap());
        assert_eq!(config.last_move, Some((Square::E2, Square::E4)));
        match config.interaction {
            InteractionPolicy::SideToMove { side, .. } => assert_eq!(side, Color::Black),
            other => panic!("unexpected policy: {other:?}"),
        }
    }

    #[test]
    fn rejected_play_move_changes_nothing() {
        let (mut board, surface) = adapter(BoardMode::Play);
        assert!(board.apply_move(Square::E2, Square::E5).unwrap().is_none());
        assert_eq!(board.position().unwrap(), STARTING_FEN);
        assert_eq!(board.last_move().unwrap(), None);
        // No partial or extra pushes on rejection.
        assert_eq!(surface.borrow().configs.len(), 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let (mut board, _surface) = adapter(BoardMode::Play);
        board.apply_move(Square::E2, Square::E4).unwrap();
        board.reset().unwrap();
        let once = board.position().unwrap();
        board.reset().unwrap();
        assert_eq!(board.position().unwrap(), once);
        assert_eq!(once, STARTING_FEN);
        assert_eq!(board.last_move().unwrap(), None);
    }

    #[test]
    fn set_position_round_trips_and_rejects_garbage() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        let (mut board, surface) = adapter(BoardMode::Play);
        board.apply_move(Square::E2, Square::E4).unwrap();

        board.set_position(fen).unwrap();
        assert_eq!(board.position().unwrap(), fen);
        assert_eq!(board.last_move().unwrap(), None);
        assert_eq!(last_config(&surface).position, fen);

        let err = board.set_position("not notation").unwrap_err();
        assert!(matches!(err, Error::InvalidPosition(_)));
        assert_eq!(board.position().unwrap(), fen);
    }

    #[test]
    fn analysis_lets_the_same_side_move_twice() {
        let (mut board, surface) = adapter(BoardMode::Analysis);

        match last_config(&surface).interaction {
            InteractionPolicy::EitherSide { ref dests } => {
                assert!(dests.contains_key(&Square::E2));
                assert!(dests.contains_key(&Square::E7));
            }
            other => panic!("unexpected policy: {other:?}"),
        }

        assert!(board.apply_move(Square::E2, Square::E4).unwrap().is_some());
        assert!(board.apply_move(Square::D2, Square::D4).unwrap().is_some());
    }

    #[test]
    fn board_edit_accepts_unconditionally_without_turn_flip() {
        let (mut board, surface) = adapter(BoardMode::BoardEdit);
        assert_eq!(last_config(&surface).interaction, InteractionPolicy::Free);
        assert!(board.legal_destinations().unwrap().is_empty());
        assert!(board.legal_moves().unwrap().is_empty());

        // Illegal as a chess move, accepted as an edit.
        let record = board.apply_move(Square::E2, Square::E5).unwrap().unwrap();
        assert_eq!(record.promotion, None);
        assert!(board.position().unwrap().contains(" w "));

        let config = last_config(&surface);
        assert_eq!(config.position, board.position().unwrap());
        assert_eq!(config.last_move, Some((Square::E2, Square::E5)));

        // Dragging from an empty square is the one rejection.
        assert!(board.apply_move(Square::A5, Square::A6).unwrap().is_none());
    }

    #[test]
    fn displayed_position_converges_after_every_mutation() {
        let (mut board, surface) = adapter(BoardMode::Play);
        let moves = [
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
        ];
        for (origin, destination) in moves {
            board.apply_move(origin, destination).unwrap().unwrap();
            assert_eq!(last_config(&surface).position, board.position().unwrap());
        }
    }

    #[test]
    fn disposed_adapter_refuses_every_operation() {
        let (mut board, surface) = adapter(BoardMode::Play);
        board.dispose();
        assert!(surface.borrow().destroyed);

        assert!(matches!(board.position(), Err(Error::Disposed)));
        assert!(matches!(board.reset(), Err(Error::Disposed)));
        assert!(matches!(board.set_position(STARTING_FEN), Err(Error::Disposed)));
        assert!(matches!(
            board.apply_move(Square::E2, Square::E4),
            Err(Error::Disposed)
        ));
        assert!(matches!(board.legal_moves(), Err(Error::Disposed)));
    }

    #[test]
    fn dropping_the_adapter_destroys_the_renderer() {
        let (board, surface) = adapter(BoardMode::Play);
        drop(board);
        assert!(surface.borrow().destroyed);
    }
}
