//! Shared vocabulary for the board adapter

use std::collections::HashMap;

use shakmaty::{Color, Role, Square};

/// Interaction mode, fixed for the lifetime of one adapter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardMode {
    /// Normal play: only the side to move may move, turn flips after.
    Play,
    /// Either side may move on any turn.
    Analysis,
    /// Free placement, no legality enforcement.
    BoardEdit,
}

impl BoardMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "play" => Some(BoardMode::Play),
            "analysis" => Some(BoardMode::Analysis),
            "boardedit" | "edit" => Some(BoardMode::BoardEdit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardMode::Play => "play",
            BoardMode::Analysis => "analysis",
            BoardMode::BoardEdit => "boardedit",
        }
    }
}

/// Describes one applied or applicable move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub origin: Square,
    pub destination: Square,
    pub role: Role,
    pub capture: Option<Role>,
    pub promotion: Option<Role>,
}

impl MoveRecord {
    pub fn role_name(&self) -> &'static str {
        role_name(self.role)
    }

    pub fn capture_name(&self) -> Option<&'static str> {
        self.capture.map(role_name)
    }

    pub fn promotion_name(&self) -> Option<&'static str> {
        self.promotion.map(role_name)
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Pawn => "pawn",
        Role::Knight => "knight",
        Role::Bishop => "bishop",
        Role::Rook => "rook",
        Role::Queen => "queen",
        Role::King => "king",
    }
}

/// Per-square reachable-square lookup used to constrain interactive
/// dragging. Squares with no legal moves are omitted.
pub type DestinationMap = HashMap<Square, Vec<Square>>;

/// What the renderer may let the user do with the pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionPolicy {
    /// Only the side to move may drag, within the destination map.
    SideToMove { side: Color, dests: DestinationMap },
    /// Either color may drag, within the destination map.
    EitherSide { dests: DestinationMap },
    /// Free placement, no destination map.
    Free,
}

/// One atomic configuration update for the renderer. The adapter never
/// pushes position and legality separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub position: String,
    pub orientation: Color,
    pub interaction: InteractionPolicy,
    pub last_move: Option<(Square, Square)>,
}
