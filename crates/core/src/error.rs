//! Error types for chess-tutor-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid position notation: {0}")]
    InvalidPosition(String),

    #[error("invalid square identifier: {0}")]
    InvalidSquare(String),

    #[error("invalid device address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    #[error("board adapter has been disposed")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, Error>;
