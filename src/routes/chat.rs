use axum::{
    Json,
    extract::{MatchedPath, State, rejection::JsonRejection},
};
use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, Lang, StatusResponse},
    services::assistant::answer,
    state::SharedState,
};

pub async fn status_handler(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        message: format!("{} server is running", state.config.service_name),
        port: state.config.port,
    })
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    route: MatchedPath,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    tracing::debug!(route = route.as_str(), "chat request");

    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable chat body");
        AppError::InvalidRequest(Lang::default())
    })?;

    let input = payload.normalize()?;
    let reply = answer(state.completion.as_ref(), &input).await?;

    Ok(Json(ChatResponse { reply }))
}
