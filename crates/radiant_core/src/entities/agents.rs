use super::null_as_default;
use crate::image::AssetImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub uuid: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub developer_name: String,
    pub display_icon: AssetImage,
    pub display_icon_small: Option<AssetImage>,
    pub bust_portrait: Option<AssetImage>,
    pub full_portrait: Option<AssetImage>,
    pub killfeed_portrait: Option<AssetImage>,
    pub background: Option<AssetImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub background_gradient_colors: Vec<String>,
    #[serde(default)]
    pub is_playable_character: bool,
    pub role: Option<AgentRole>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub abilities: Vec<AgentAbility>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRole {
    pub uuid: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub display_icon: Option<AssetImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAbility {
    /// "Ability1", "Ability2", "Grenade", "Ultimate" or "Passive".
    pub slot: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub display_icon: Option<AssetImage>,
}
