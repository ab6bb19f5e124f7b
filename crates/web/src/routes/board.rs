use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chess_tutor_core::{parse_square, BoardMode};

use crate::AppState;

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub modes: Vec<ModeTab>,
    pub rows: Vec<Vec<Cell>>,
    pub fen: String,
    pub movable: String,
    pub move_count: usize,
    pub last_move: String,
}

pub struct ModeTab {
    pub id: &'static str,
    pub label: String,
    pub active: bool,
}

pub struct Cell {
    pub name: String,
    pub glyph: String,
    pub css: String,
}

// ============================================================================
// QUERY / FORM PARAMS
// ============================================================================

#[derive(Deserialize)]
pub struct BoardQuery {
    pub mode: Option<String>,
}

#[derive(Deserialize)]
pub struct MoveForm {
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct PositionForm {
    pub fen: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn board_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BoardQuery>,
) -> impl IntoResponse {
    let mut session = state.board.lock().unwrap();
    if let Some(mode) = params.mode.as_deref().and_then(BoardMode::parse) {
        session.switch_mode(mode);
    }

    let current = session.mode();
    let modes = [BoardMode::Play, BoardMode::Analysis, BoardMode::BoardEdit]
        .iter()
        .map(|m| ModeTab {
            id: m.as_str(),
            label: m.as_str().to_uppercase(),
            active: *m == current,
        })
        .collect();

    let surface = session.snapshot();
    let rows = surface
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|sq| Cell {
                    name: sq.name.clone(),
                    glyph: sq.glyph.to_string(),
                    css: format!(
                        "{}{}",
                        if sq.light { "light" } else { "dark" },
                        if sq.highlight { " last" } else { "" }
                    ),
                })
                .collect()
        })
        .collect();

    let template = BoardTemplate {
        title: "Board Workbench".to_string(),
        modes,
        rows,
        fen: session.adapter().position().unwrap_or_default(),
        movable: surface.movable,
        move_count: session
            .adapter()
            .legal_moves()
            .map(|m| m.len())
            .unwrap_or(0),
        last_move: session
            .adapter()
            .last_move()
            .ok()
            .flatten()
            .map(|(from, to)| format!("{from} → {to}"))
            .unwrap_or_else(|| "none".to_string()),
    };
    Html(template.render().unwrap())
}

pub async fn submit_move(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MoveForm>,
) -> Redirect {
    let (from, to) = match (parse_square(&form.from), parse_square(&form.to)) {
        (Ok(from), Ok(to)) => (from, to),
        _ => {
            tracing::warn!("bad square pair: '{}' '{}'", form.from, form.to);
            return Redirect::to("/board");
        }
    };

    let mut session = state.board.lock().unwrap();
    match session.adapter_mut().apply_move(from, to) {
        Ok(Some(record)) => {
            tracing::info!("move applied: {} -> {}", record.origin, record.destination)
        }
        Ok(None) => tracing::info!("move rejected: {from} -> {to}"),
        Err(e) => tracing::warn!("move failed: {e}"),
    }
    Redirect::to("/board")
}

pub async fn set_position(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PositionForm>,
) -> Redirect {
    let mut session = state.board.lock().unwrap();
    if let Err(e) = session.adapter_mut().set_position(&form.fen) {
        tracing::warn!("position rejected: {e}");
    }
    Redirect::to("/board")
}

pub async fn reset_board(State(state): State<Arc<AppState>>) -> Redirect {
    let mut session = state.board.lock().unwrap();
    if let Err(e) = session.adapter_mut().reset() {
        tracing::warn!("reset failed: {e}");
    }
    Redirect::to("/board")
}

// ============================================================================
// API
// ============================================================================

#[derive(Serialize)]
pub struct MoveView {
    pub from: String,
    pub to: String,
    pub piece: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<&'static str>,
}

pub async fn legal_moves(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MoveView>>, StatusCode> {
    let session = state.board.lock().unwrap();
    let moves = session
        .adapter()
        .legal_moves()
        .map_err(|_| StatusCode::CONFLICT)?;

    Ok(Json(
        moves
            .iter()
            .map(|m| MoveView {
                from: m.origin.to_string(),
                to: m.destination.to_string(),
                piece: m.role_name(),
                capture: m.capture_name(),
                promotion: m.promotion_name(),
            })
            .collect(),
    ))
}
