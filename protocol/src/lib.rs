//! Wire bodies exchanged between the puzzle page and the puzzle server.
//!
//! Field names follow the JSON the server speaks, so the structs use `snake_case`
//! throughout. Optional fields are tolerated in both directions since older servers
//! omit `game_date`, `game_complete` and `remaining`.

use serde::{Deserialize, Serialize};

pub const GAME_PATH: &str = "/api/game";
pub const CHECK_SELECTION_PATH: &str = "/api/check_selection";
pub const DAILY_INFO_PATH: &str = "/api/daily_info";
pub const NEW_GAME_PATH: &str = "/api/new_game";
pub const GAME_STATUS_PATH: &str = "/api/game_status";

/// `GET /api/game`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse {
    pub words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_date: Option<String>,
}

/// `POST /api/check_selection` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub selected_words: Vec<String>,
}

/// `POST /api/check_selection` response body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u8>,
}

impl CheckResponse {
    pub fn correct(category_name: impl Into<String>) -> Self {
        Self {
            valid: true,
            category_name: Some(category_name.into()),
            ..Default::default()
        }
    }

    pub fn wrong(message: Option<String>) -> Self {
        Self {
            valid: false,
            message,
            ..Default::default()
        }
    }
}

/// `GET /api/daily_info`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInfo {
    pub today: String,
    #[serde(default)]
    pub is_new_day: bool,
}

/// `POST /api/new_game`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    pub words: Vec<String>,
}

/// A category as the server reports it, without any presentation data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundCategory {
    pub name: String,
    pub words: Vec<String>,
}

/// `GET /api/game_status`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatusResponse {
    #[serde(default)]
    pub found_categories: Vec<FoundCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_categories: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body the server sends alongside a non-success status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
