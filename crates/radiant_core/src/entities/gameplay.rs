use crate::image::AssetImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapInfo {
    pub uuid: String,
    pub display_name: String,
    pub narrative_description: Option<String>,
    pub tactical_description: Option<String>,
    pub coordinates: Option<String>,
    pub display_icon: Option<AssetImage>,
    pub list_view_icon: Option<AssetImage>,
    pub splash: Option<AssetImage>,
    /// Game path used by match data, e.g. "/Game/Maps/Ascent/Ascent".
    pub map_url: String,
    #[serde(default)]
    pub x_multiplier: f64,
    #[serde(default)]
    pub y_multiplier: f64,
    #[serde(default)]
    pub x_scalar_to_add: f64,
    #[serde(default)]
    pub y_scalar_to_add: f64,
}

impl MapInfo {
    /// Projects in-game world coordinates onto the minimap's unit square.
    pub fn minimap_position(&self, x: f64, y: f64) -> (f64, f64) {
        (
            y * self.x_multiplier + self.x_scalar_to_add,
            x * self.y_multiplier + self.y_scalar_to_add,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMode {
    pub uuid: String,
    pub display_name: String,
    pub duration: Option<String>,
    #[serde(default)]
    pub allows_match_timeouts: bool,
    #[serde(default)]
    pub is_team_voice_allowed: bool,
    #[serde(default)]
    pub is_minimap_hidden: bool,
    #[serde(default)]
    pub orb_count: u32,
    #[serde(default)]
    pub rounds_per_half: i32,
    pub display_icon: Option<AssetImage>,
    #[serde(default)]
    pub asset_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub uuid: String,
    /// Identifier used by the game API, e.g. "competitive".
    pub queue_id: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub dropdown_text: Option<String>,
    pub selected_text: Option<String>,
    #[serde(default)]
    pub is_beta: bool,
    pub display_icon: Option<AssetImage>,
}
