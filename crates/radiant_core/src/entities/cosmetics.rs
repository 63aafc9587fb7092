use super::null_as_default;
use crate::image::AssetImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCard {
    pub uuid: String,
    pub display_name: String,
    #[serde(default)]
    pub is_hidden_if_not_owned: bool,
    pub theme_uuid: Option<String>,
    pub display_icon: Option<AssetImage>,
    pub small_art: Option<AssetImage>,
    pub wide_art: Option<AssetImage>,
    pub large_art: Option<AssetImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTitle {
    pub uuid: String,
    pub display_name: Option<String>,
    /// `None` for the empty "no title" entry.
    pub title_text: Option<String>,
    #[serde(default)]
    pub is_hidden_if_not_owned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spray {
    pub uuid: String,
    pub display_name: String,
    pub category: Option<String>,
    pub theme_uuid: Option<String>,
    pub display_icon: Option<AssetImage>,
    pub full_icon: Option<AssetImage>,
    pub full_transparent_icon: Option<AssetImage>,
    pub animation_png: Option<AssetImage>,
    pub animation_gif: Option<AssetImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub levels: Vec<SprayLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprayLevel {
    pub uuid: String,
    pub spray_level: u32,
    pub display_name: String,
    pub display_icon: Option<AssetImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buddy {
    pub uuid: String,
    pub display_name: String,
    #[serde(default)]
    pub is_hidden_if_not_owned: bool,
    pub theme_uuid: Option<String>,
    pub display_icon: Option<AssetImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub levels: Vec<BuddyLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuddyLevel {
    pub uuid: String,
    pub charm_level: u32,
    pub display_name: String,
    pub display_icon: Option<AssetImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub uuid: String,
    pub display_name: String,
    pub display_name_singular: Option<String>,
    pub display_icon: Option<AssetImage>,
    pub large_icon: Option<AssetImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub uuid: String,
    pub display_name: String,
    pub display_name_sub_text: Option<String>,
    #[serde(default)]
    pub description: String,
    pub extra_description: Option<String>,
    pub promo_description: Option<String>,
    pub display_icon: Option<AssetImage>,
    pub display_icon2: Option<AssetImage>,
    pub vertical_promo_image: Option<AssetImage>,
}

/// Skin rarity tier (Select, Deluxe, Premium, Exclusive, Ultra).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTier {
    pub uuid: String,
    pub display_name: String,
    #[serde(default)]
    pub dev_name: String,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub juice_value: u32,
    #[serde(default)]
    pub juice_cost: u32,
    /// RGBA hex, e.g. "5a9fe233"
    #[serde(default)]
    pub highlight_color: String,
    pub display_icon: Option<AssetImage>,
}
