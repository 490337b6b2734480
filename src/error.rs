//! Error types for the application

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Palette construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Invalid palette: at least one reference color is required")]
    InvalidPalette,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnknownColor(_) => StatusCode::NOT_FOUND,
            AppError::ImageProcessing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Palette(_) | AppError::Config(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}
