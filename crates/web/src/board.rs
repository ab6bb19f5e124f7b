//! Server-side board surface
//!
//! Stand-in for a client rendering library: receives configuration pushes
//! from the adapter and rasterizes the position into an 8x8 glyph grid that
//! the board page reads. The adapter owns the renderer; the page reads the
//! shared surface behind it.

use std::sync::{Arc, Mutex};

use chess_tutor_core::{
    BoardAdapter, BoardConfig, BoardMode, BoardRenderer, InteractionPolicy, ShakmatyRules,
};

#[derive(Debug, Clone)]
pub struct SquareView {
    pub name: String,
    pub glyph: &'static str,
    pub light: bool,
    pub highlight: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BoardSurface {
    /// Rank 8 first; orientation is fixed to white.
    pub rows: Vec<Vec<SquareView>>,
    /// Who may currently drag: "white", "black", "both" or "free".
    pub movable: String,
    pub destroyed: bool,
}

/// [`BoardRenderer`] drawing onto a shared [`BoardSurface`].
pub struct GridRenderer {
    surface: Arc<Mutex<BoardSurface>>,
}

impl GridRenderer {
    pub fn new(surface: Arc<Mutex<BoardSurface>>) -> Self {
        Self { surface }
    }
}

impl BoardRenderer for GridRenderer {
    fn push(&mut self, config: &BoardConfig) {
        let mut surface = self.surface.lock().unwrap();
        surface.rows = rasterize(config);
        surface.movable = match &config.interaction {
            InteractionPolicy::SideToMove { side, .. } => {
                if side.is_white() {
                    "white"
                } else {
                    "black"
                }
            }
            InteractionPolicy::EitherSide { .. } => "both",
            InteractionPolicy::Free => "free",
        }
        .to_string();
        surface.destroyed = false;
    }

    fn destroy(&mut self) {
        let mut surface = self.surface.lock().unwrap();
        surface.rows.clear();
        surface.movable.clear();
        surface.destroyed = true;
    }
}

fn rasterize(config: &BoardConfig) -> Vec<Vec<SquareView>> {
    let board_field = config.position.split_whitespace().next().unwrap_or("");
    let mut rows = Vec::with_capacity(8);
    for (row_idx, rank_line) in board_field.split('/').take(8).enumerate() {
        let mut row = Vec::with_capacity(8);
        let mut file = 0usize;
        for c in rank_line.chars() {
            if let Some(run) = c.to_digit(10) {
                for _ in 0..run {
                    row.push(square_view(file, row_idx, "", config));
                    file += 1;
                }
            } else {
                row.push(square_view(file, row_idx, glyph(c), config));
                file += 1;
            }
        }
        rows.push(row);
    }
    rows
}

fn square_view(file: usize, row_idx: usize, glyph: &'static str, config: &BoardConfig) -> SquareView {
    let rank = 8 - row_idx;
    let name = format!("{}{}", (b'a' + file as u8) as char, rank);
    let highlight = config
        .last_move
        .map_or(false, |(from, to)| from.to_string() == name || to.to_string() == name);
    SquareView {
        name,
        glyph,
        light: (file + rank - 1) % 2 == 1,
        highlight,
    }
}

fn glyph(c: char) -> &'static str {
    match c {
        'K' => "♔",
        'Q' => "♕",
        'R' => "♖",
        'B' => "♗",
        'N' => "♘",
        'P' => "♙",
        'k' => "♚",
        'q' => "♛",
        'r' => "♜",
        'b' => "♝",
        'n' => "♞",
        'p' => "♟",
        _ => "",
    }
}

/// One adapter plus the surface its renderer draws on.
pub struct BoardSession {
    adapter: BoardAdapter<ShakmatyRules, GridRenderer>,
    surface: Arc<Mutex<BoardSurface>>,
}

impl BoardSession {
    pub fn new(mode: BoardMode) -> Self {
        let surface = Arc::new(Mutex::new(BoardSurface::default()));
        let renderer = GridRenderer::new(surface.clone());
        let adapter = BoardAdapter::new(ShakmatyRules::new(), renderer, mode);
        Self { adapter, surface }
    }

    pub fn adapter(&self) -> &BoardAdapter<ShakmatyRules, GridRenderer> {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut BoardAdapter<ShakmatyRules, GridRenderer> {
        &mut self.adapter
    }

    pub fn mode(&self) -> BoardMode {
        self.adapter.mode()
    }

    pub fn snapshot(&self) -> BoardSurface {
        self.surface.lock().unwrap().clone()
    }

    /// The mode is fixed per adapter, so switching tears the old one down
    /// (re-initializing the renderer) and carries the position over when it
    /// is still loadable.
    pub fn switch_mode(&mut self, mode: BoardMode) {
        if mode == self.mode() {
            return;
        }
        let carried = self.adapter.position().ok();
        let mut next = BoardSession::new(mode);
        if let Some(fen) = carried {
            if let Err(e) = next.adapter_mut().set_position(&fen) {
                tracing::warn!("position not carried across mode switch: {e}");
            }
        }
        self.adapter.dispose();
        *self = next;
    }
}
