use serde::{Deserialize, Serialize};

/// Bounces needed to win a round.
pub const DEFAULT_WIN_THRESHOLD: i64 = 999;

/// Colleagues seeded at startup when `COLLEAGUES` is not set
pub const DEFAULT_COLLEAGUES: &[&str] = &[
    "Kent", "Rain", "Dos", "Khayie", "Shane", "Clyde Y", "Anagen", "Clyde C", "Eve",
    "JL", "James", "Clark", "Star", "Coco", "Japh", "JM", "Sol", "Harvey",
];

/// One row of the leaderboard
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ColleagueRecord {
    pub name: String,
    pub bounce_count: i64,
    pub win_count: i64,
}

impl ColleagueRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounce_count: 0,
            win_count: 0,
        }
    }
}

/// Result of a single bounce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BounceOutcome {
    pub record: ColleagueRecord,
    pub winner: bool,
}

/// Request body for POST /api/bounce
#[derive(Debug, Deserialize)]
pub struct BounceRequest {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
}

impl BounceRequest {
    /// The colleague name, if one was sent as a string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(serde_json::Value::as_str)
    }
}

/// Response for POST /api/bounce
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BounceResponse {
    pub success: bool,
    pub name: String,
    pub bounces: i64,
    pub wins: i64,
    pub winner: bool,
}

impl From<BounceOutcome> for BounceResponse {
    fn from(outcome: BounceOutcome) -> Self {
        BounceResponse {
            success: true,
            name: outcome.record.name,
            bounces: outcome.record.bounce_count,
            wins: outcome.record.win_count,
            winner: outcome.winner,
        }
    }
}

/// Response wrapper for the leaderboard endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub colleagues: Vec<ColleagueRecord>,
    pub count: usize,
    pub threshold: i64,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}
