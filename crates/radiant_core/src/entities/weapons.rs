use super::null_as_default;
use crate::image::AssetImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub uuid: String,
    pub display_name: String,
    /// e.g. "EEquippableCategory::Rifle"
    #[serde(default)]
    pub category: String,
    pub default_skin_uuid: Option<String>,
    pub display_icon: AssetImage,
    pub kill_stream_icon: Option<AssetImage>,
    pub shop_data: Option<ShopData>,
    pub weapon_stats: Option<WeaponStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skins: Vec<WeaponSkin>,
}

impl Weapon {
    pub fn default_skin(&self) -> Option<&WeaponSkin> {
        let default = self.default_skin_uuid.as_deref()?;
        self.skins.iter().find(|skin| skin.uuid == default)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopData {
    pub cost: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_text: String,
    pub new_image: Option<AssetImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeaponStats {
    pub fire_rate: f64,
    pub magazine_size: u32,
    pub run_speed_multiplier: f64,
    pub equip_time_seconds: f64,
    pub reload_time_seconds: f64,
    pub first_bullet_accuracy: f64,
    pub shotgun_pellet_count: u32,
    pub wall_penetration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponSkin {
    pub uuid: String,
    pub display_name: String,
    pub theme_uuid: Option<String>,
    pub content_tier_uuid: Option<String>,
    pub display_icon: Option<AssetImage>,
    pub wallpaper: Option<AssetImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chromas: Vec<SkinChroma>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub levels: Vec<SkinLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinChroma {
    pub uuid: String,
    pub display_name: String,
    pub display_icon: Option<AssetImage>,
    pub full_render: Option<AssetImage>,
    pub swatch: Option<AssetImage>,
    pub streamed_video: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinLevel {
    pub uuid: String,
    pub display_name: Option<String>,
    /// e.g. "EEquippableSkinLevelItem::VFX"
    pub level_item: Option<String>,
    pub display_icon: Option<AssetImage>,
    pub streamed_video: Option<String>,
}
