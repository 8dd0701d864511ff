use axum::{
    extract::{Path, State},
    response::Json,
};
use crate::error::ApiError;
use crate::models::{BounceRequest, BounceResponse, ColleagueRecord, LeaderboardResponse, ResetResponse};
use crate::service::Leaderboard;

// GET /api/leaderboard - All colleagues in seed order
pub async fn get_leaderboard(
    State(board): State<Leaderboard>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let colleagues = board.get_all().await?;

    Ok(Json(LeaderboardResponse {
        count: colleagues.len(),
        threshold: board.threshold(),
        colleagues,
    }))
}

// GET /api/leaderboard/{name} - Single colleague
pub async fn get_colleague(
    State(board): State<Leaderboard>,
    Path(name): Path<String>,
) -> Result<Json<ColleagueRecord>, ApiError> {
    Ok(Json(board.get(&name).await?))
}

// POST /api/bounce {"name": "Kent"} - Count one bounce
// A missing or non-string name is just another unknown colleague
pub async fn bounce(
    State(board): State<Leaderboard>,
    Json(request): Json<BounceRequest>,
) -> Result<Json<BounceResponse>, ApiError> {
    let name = request.name().ok_or_else(|| {
        let sent = request.name.as_ref().map(|v| v.to_string()).unwrap_or_default();
        ApiError::NotFound(sent)
    })?;

    let outcome = board.increment(name).await?;
    Ok(Json(outcome.into()))
}

// POST /api/reset - Zero every bounce and win
pub async fn reset(
    State(board): State<Leaderboard>,
) -> Result<Json<ResetResponse>, ApiError> {
    board.reset().await?;

    Ok(Json(ResetResponse {
        success: true,
        message: "Leaderboard reset".to_string(),
    }))
}
