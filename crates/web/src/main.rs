use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use chess_tutor_core::{BoardMode, DeviceLink};

mod board;
mod routes;

use board::BoardSession;

pub struct AppState {
    pub board: Mutex<BoardSession>,
    pub device: Mutex<DeviceLink>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let state = Arc::new(AppState {
        board: Mutex::new(BoardSession::new(BoardMode::Play)),
        device: Mutex::new(DeviceLink::new()),
    });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/connect", post(routes::connect_device))
        .route("/disconnect", post(routes::disconnect_device))
        .route("/games", get(routes::games_list))
        .route("/analysis", get(routes::analysis_page))
        .route("/practice", get(routes::practice_page))
        .route("/board", get(routes::board::board_page))
        .route("/board/move", post(routes::board::submit_move))
        .route("/board/position", post(routes::board::set_position))
        .route("/board/reset", post(routes::board::reset_board))
        .route("/board/moves", get(routes::board::legal_moves))
        .route("/health", get(routes::health))
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();

    println!("Server running at http://localhost:3000");

    axum::serve(listener, app).await.unwrap();
}
