use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use chess_tutor_core::history::{self, HistoryStats, ResultFilter, SortKey};

use crate::AppState;

pub mod board;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub total_games: u32,
    pub win_rate: u32,
    pub current_rating: u16,
    pub device_connected: bool,
    pub device_address: String,
}

#[derive(Template)]
#[template(path = "games.html")]
pub struct GamesTemplate {
    pub title: String,
    pub stats: HistoryStats,
    pub filter: String,
    pub sort: String,
    pub games: Vec<GameRow>,
    pub empty: bool,
}

#[derive(Template)]
#[template(path = "coming_soon.html")]
pub struct ComingSoonTemplate {
    pub title: String,
    pub lead: String,
    pub note: String,
}

pub struct GameRow {
    pub id: String,
    pub result: String,
    pub result_class: String,
    pub icon: String,
    pub date: String,
    pub opponent: String,
    pub color: String,
    pub opening: String,
    pub moves: u16,
    pub rating: String,
}

#[derive(Deserialize)]
pub struct GamesQuery {
    pub filter: Option<String>,
    pub sort: Option<String>,
}

#[derive(Deserialize)]
pub struct ConnectForm {
    pub address: String,
}

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let games = history::sample_games();
    let stats = HistoryStats::from_games(&games);
    let current_rating = history::select(&games, ResultFilter::All, SortKey::Date)
        .first()
        .map(|g| g.rating)
        .unwrap_or(0);

    let device = state.device.lock().unwrap();
    let template = IndexTemplate {
        title: "Chess Tutor".to_string(),
        total_games: stats.total,
        win_rate: stats.win_rate,
        current_rating,
        device_connected: device.is_connected(),
        device_address: device
            .address()
            .map(|a| a.to_string())
            .unwrap_or_default(),
    };
    Html(template.render().unwrap())
}

pub async fn games_list(Query(params): Query<GamesQuery>) -> impl IntoResponse {
    let filter = ResultFilter::parse(params.filter.as_deref().unwrap_or(""));
    let sort = SortKey::parse(params.sort.as_deref().unwrap_or(""));

    let games = history::sample_games();
    let stats = HistoryStats::from_games(&games);

    let rows: Vec<GameRow> = history::select(&games, filter, sort)
        .iter()
        .map(|g| GameRow {
            id: g.id.clone(),
            result: g.result.as_str().to_uppercase(),
            result_class: g.result.as_str().to_string(),
            icon: g.result.icon().to_string(),
            date: format_date(&g.date),
            opponent: g.opponent.clone(),
            color: if g.player_color.is_white() {
                "white".to_string()
            } else {
                "black".to_string()
            },
            opening: g.opening.clone(),
            moves: g.moves,
            rating: format!("{} vs {}", g.rating, g.opponent_rating),
        })
        .collect();

    let template = GamesTemplate {
        title: "Game History".to_string(),
        stats,
        filter: filter.as_str().to_string(),
        sort: sort.as_str().to_string(),
        empty: rows.is_empty(),
        games: rows,
    };
    Html(template.render().unwrap())
}

pub async fn analysis_page() -> impl IntoResponse {
    let template = ComingSoonTemplate {
        title: "Position Analysis".to_string(),
        lead: "Analyze chess positions and get insights on the best moves".to_string(),
        note: "Position analysis features will be available once the board device integration is complete.".to_string(),
    };
    Html(template.render().unwrap())
}

pub async fn practice_page() -> impl IntoResponse {
    let template = ComingSoonTemplate {
        title: "Practice".to_string(),
        lead: "Practice tactical puzzles and improve your pattern recognition skills".to_string(),
        note: "Practice features will be available once the board device integration is complete.".to_string(),
    };
    Html(template.render().unwrap())
}

pub async fn connect_device(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ConnectForm>,
) -> Redirect {
    match state.device.lock().unwrap().connect(&form.address) {
        Ok(addr) => tracing::info!("device link established with {addr}"),
        Err(e) => tracing::warn!("device connect rejected: {e}"),
    }
    Redirect::to("/")
}

pub async fn disconnect_device(State(state): State<Arc<AppState>>) -> Redirect {
    state.device.lock().unwrap().disconnect();
    Redirect::to("/")
}

pub async fn health() -> &'static str {
    "OK"
}

fn format_date(iso: &str) -> String {
    chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}
