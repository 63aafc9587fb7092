use super::null_as_default;
use crate::image::AssetImage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub uuid: String,
    pub display_name: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub xp_grant: u32,
    #[serde(default)]
    pub progress_to_complete: u32,
    pub activation_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objectives: Vec<MissionObjective>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionObjective {
    pub objective_uuid: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub uuid: String,
    pub directive: Option<String>,
    #[serde(default)]
    pub asset_path: String,
}

/// An agent contract or battle pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub uuid: String,
    pub display_name: String,
    pub display_icon: Option<AssetImage>,
    #[serde(default)]
    pub ship_it: bool,
    pub free_reward_schedule_uuid: Option<String>,
    pub content: ContractContent,
}

impl Contract {
    /// Total XP needed to complete every chapter.
    pub fn total_xp(&self) -> u64 {
        self.content
            .chapters
            .iter()
            .flat_map(|chapter| &chapter.levels)
            .map(|level| u64::from(level.xp))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractContent {
    /// "Agent", "Season" or "Event".
    pub relation_type: Option<String>,
    pub relation_uuid: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chapters: Vec<ContractChapter>,
    pub premium_reward_schedule_uuid: Option<String>,
    #[serde(default, rename = "premiumVPCost")]
    pub premium_vp_cost: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractChapter {
    #[serde(default)]
    pub is_epilogue: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub levels: Vec<ContractLevel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub free_rewards: Vec<ContractReward>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractLevel {
    pub reward: ContractReward,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub vp_cost: i32,
    #[serde(default, rename = "isPurchasableWithVP")]
    pub is_purchasable_with_vp: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractReward {
    /// "EquippableSkinLevel", "Spray", "PlayerCard", "EquippableCharmLevel", ...
    #[serde(rename = "type")]
    pub kind: String,
    pub uuid: String,
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub is_highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub uuid: String,
    pub display_name: String,
    /// "EAresSeasonType::Act" or "EAresSeasonType::Episode"; `None` for the closed beta.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub parent_uuid: Option<String>,
}

impl Season {
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveSeason {
    pub uuid: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub season_uuid: String,
    pub competitive_tiers_uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub borders: Vec<SeasonBorder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonBorder {
    pub uuid: String,
    pub level: u32,
    pub wins_required: u32,
    pub display_icon: Option<AssetImage>,
    pub small_icon: Option<AssetImage>,
}

/// One episode's rank ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveTierTable {
    pub uuid: String,
    #[serde(default)]
    pub asset_object_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tiers: Vec<CompetitiveTier>,
}

impl CompetitiveTierTable {
    pub fn tier(&self, number: u32) -> Option<&CompetitiveTier> {
        self.tiers.iter().find(|tier| tier.tier == number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveTier {
    pub tier: u32,
    pub tier_name: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub division_name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub background_color: String,
    pub small_icon: Option<AssetImage>,
    pub large_icon: Option<AssetImage>,
    pub rank_triangle_down_icon: Option<AssetImage>,
    pub rank_triangle_up_icon: Option<AssetImage>,
}
