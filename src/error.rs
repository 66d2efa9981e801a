// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::{ErrorResponse, Lang};
use crate::services::relay::RelayError;

/// Per-request failures. None of them are retried or fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("request has no usable user message")]
    InvalidRequest(Lang),

    #[error("upstream API key is not configured")]
    Configuration(Lang),

    #[error("upstream completion failed: {detail}")]
    Upstream { lang: Lang, detail: String },
}

impl AppError {
    pub fn from_relay(lang: Lang, err: RelayError) -> Self {
        match err {
            RelayError::MissingApiKey => AppError::Configuration(lang),
            other => AppError::Upstream {
                lang,
                detail: other.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text shown to the caller. Upstream detail never leaves the server.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(Lang::Ar) => "رسالة غير صالحة.",
            AppError::InvalidRequest(Lang::En) => "Invalid message.",
            AppError::Configuration(Lang::Ar) => {
                "لم يتم ضبط مفتاح الوصول لخدمة الذكاء الاصطناعي على الخادم."
            }
            AppError::Configuration(Lang::En) => {
                "The AI service API key is not configured on the server."
            }
            AppError::Upstream { lang: Lang::Ar, .. } => {
                "حدث خطأ داخلي أثناء الاتصال بنظام الذكاء الاصطناعي. يرجى المحاولة لاحقاً."
            }
            AppError::Upstream { lang: Lang::En, .. } => {
                "An internal error occurred while contacting the AI system. Please try again later."
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidRequest(_) => tracing::debug!("rejected chat request: {self}"),
            AppError::Configuration(_) => tracing::error!("{self}: set OPENAI_API_KEY"),
            AppError::Upstream { detail, .. } => {
                tracing::error!(%detail, "error while relaying chat request")
            }
        }

        let body = Json(ErrorResponse {
            error: self.public_message().to_string(),
        });
        (self.status(), body).into_response()
    }
}
