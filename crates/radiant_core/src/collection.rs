use crate::entities::*;
use crate::image::AssetImage;
use crate::version::AssetVersion;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Immutable snapshot of every asset category for one version and language.
///
/// Built once by the collection builder and replaced wholesale on refresh.
/// IDs referenced across categories (skin levels, buddy levels, content tiers,
/// tier tables) are expected to resolve within the same snapshot; upstream
/// inconsistencies are left as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCollection {
    pub version: AssetVersion,
    pub language: String,

    pub maps: HashMap<String, MapInfo>,
    pub agents: HashMap<String, Agent>,
    pub missions: HashMap<String, Mission>,
    pub contracts: HashMap<String, Contract>,
    pub game_modes: HashMap<String, GameMode>,
    pub queues: HashMap<String, Queue>,
    pub objectives: HashMap<String, Objective>,
    pub player_cards: HashMap<String, PlayerCard>,
    pub player_titles: HashMap<String, PlayerTitle>,
    pub weapons: HashMap<String, Weapon>,
    pub seasons: HashMap<String, Season>,
    pub competitive_seasons: HashMap<String, CompetitiveSeason>,
    pub competitive_tiers: HashMap<String, CompetitiveTierTable>,
    pub sprays: HashMap<String, Spray>,
    pub buddies: HashMap<String, Buddy>,
    pub currencies: HashMap<String, Currency>,
    pub bundles: HashMap<String, Bundle>,
    pub content_tiers: HashMap<String, ContentTier>,

    /// Skin level ID -> where that level sits inside [`AssetCollection::weapons`].
    pub skins_by_level_id: HashMap<String, WeaponSkinLevelPath>,
    /// Buddy level ID -> owning buddy ID.
    pub buddies_by_level_id: HashMap<String, String>,
}

/// Position of a skin level: `weapons[weapon].skins[skin_index].levels[level_index]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponSkinLevelPath {
    pub weapon: String,
    pub skin_index: usize,
    pub level_index: usize,
}

/// A resolved skin level together with its owners.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSkinLevel<'a> {
    pub weapon: &'a Weapon,
    pub skin: &'a WeaponSkin,
    pub level: &'a SkinLevel,
}

impl AssetCollection {
    pub fn skin_level(&self, level_id: &str) -> Option<ResolvedSkinLevel<'_>> {
        let path = self.skins_by_level_id.get(level_id)?;
        let weapon = self.weapons.get(&path.weapon)?;
        let skin = weapon.skins.get(path.skin_index)?;
        let level = skin.levels.get(path.level_index)?;
        Some(ResolvedSkinLevel {
            weapon,
            skin,
            level,
        })
    }

    pub fn buddy_for_level(&self, level_id: &str) -> Option<&Buddy> {
        self.buddies_by_level_id
            .get(level_id)
            .and_then(|buddy| self.buddies.get(buddy))
    }

    /// Match data references maps by game path rather than by UUID.
    pub fn map_for_path(&self, map_url: &str) -> Option<&MapInfo> {
        self.maps.values().find(|map| map.map_url == map_url)
    }

    pub fn queue_by_queue_id(&self, queue_id: &str) -> Option<&Queue> {
        self.queues.values().find(|queue| queue.queue_id == queue_id)
    }

    /// The rank ladder that was active for a competitive season.
    pub fn tiers_for_season(&self, season_id: &str) -> Option<&CompetitiveTierTable> {
        let season = self
            .competitive_seasons
            .values()
            .find(|season| season.season_uuid == season_id)?;
        self.competitive_tiers.get(&season.competitive_tiers_uuid)
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Agent => self.agents.len(),
            EntityKind::Map => self.maps.len(),
            EntityKind::Weapon => self.weapons.len(),
            EntityKind::SkinLevel => self.skins_by_level_id.len(),
            EntityKind::Contract => self.contracts.len(),
            EntityKind::GameMode => self.game_modes.len(),
            EntityKind::Queue => self.queues.len(),
            EntityKind::PlayerCard => self.player_cards.len(),
            EntityKind::Spray => self.sprays.len(),
            EntityKind::Buddy => self.buddies.len(),
            EntityKind::Currency => self.currencies.len(),
            EntityKind::Bundle => self.bundles.len(),
            EntityKind::ContentTier => self.content_tiers.len(),
        }
    }

    /// Keyed image accessor: `field` of the entity `id` of category `kind`.
    ///
    /// Returns `None` when the entity is unknown, the field does not apply to
    /// that category, or the API has no image for it.
    pub fn image_for(&self, kind: EntityKind, id: &str, field: ImageField) -> Option<&AssetImage> {
        use ImageField::*;

        match kind {
            EntityKind::Agent => {
                let agent = self.agents.get(id)?;
                match field {
                    DisplayIcon => Some(&agent.display_icon),
                    DisplayIconSmall => agent.display_icon_small.as_ref(),
                    BustPortrait => agent.bust_portrait.as_ref(),
                    FullPortrait => agent.full_portrait.as_ref(),
                    KillfeedPortrait => agent.killfeed_portrait.as_ref(),
                    Background => agent.background.as_ref(),
                    RoleIcon => agent.role.as_ref()?.display_icon.as_ref(),
                    _ => None,
                }
            }
            EntityKind::Map => {
                let map = self.maps.get(id)?;
                match field {
                    DisplayIcon => map.display_icon.as_ref(),
                    ListViewIcon => map.list_view_icon.as_ref(),
                    Splash => map.splash.as_ref(),
                    _ => None,
                }
            }
            EntityKind::Weapon => {
                let weapon = self.weapons.get(id)?;
                match field {
                    DisplayIcon => Some(&weapon.display_icon),
                    KillStreamIcon => weapon.kill_stream_icon.as_ref(),
                    _ => None,
                }
            }
            EntityKind::SkinLevel => {
                let resolved = self.skin_level(id)?;
                match field {
                    // Base levels usually carry no icon of their own.
                    DisplayIcon => resolved
                        .level
                        .display_icon
                        .as_ref()
                        .or(resolved.skin.display_icon.as_ref()),
                    Wallpaper => resolved.skin.wallpaper.as_ref(),
                    _ => None,
                }
            }
            EntityKind::Contract => match field {
                DisplayIcon => self.contracts.get(id)?.display_icon.as_ref(),
                _ => None,
            },
            EntityKind::GameMode => match field {
                DisplayIcon => self.game_modes.get(id)?.display_icon.as_ref(),
                _ => None,
            },
            EntityKind::Queue => match field {
                DisplayIcon => self.queues.get(id)?.display_icon.as_ref(),
                _ => None,
            },
            EntityKind::PlayerCard => {
                let card = self.player_cards.get(id)?;
                match field {
                    DisplayIcon => card.display_icon.as_ref(),
                    SmallArt => card.small_art.as_ref(),
                    WideArt => card.wide_art.as_ref(),
                    LargeArt => card.large_art.as_ref(),
                    _ => None,
                }
            }
            EntityKind::Spray => {
                let spray = self.sprays.get(id)?;
                match field {
                    DisplayIcon => spray.display_icon.as_ref(),
                    FullIcon => spray.full_icon.as_ref(),
                    FullTransparentIcon => spray.full_transparent_icon.as_ref(),
                    AnimationPng => spray.animation_png.as_ref(),
                    _ => None,
                }
            }
            EntityKind::Buddy => match field {
                DisplayIcon => self.buddies.get(id)?.display_icon.as_ref(),
                _ => None,
            },
            EntityKind::Currency => {
                let currency = self.currencies.get(id)?;
                match field {
                    DisplayIcon => currency.display_icon.as_ref(),
                    LargeIcon => currency.large_icon.as_ref(),
                    _ => None,
                }
            }
            EntityKind::Bundle => {
                let bundle = self.bundles.get(id)?;
                match field {
                    DisplayIcon => bundle.display_icon.as_ref(),
                    DisplayIcon2 => bundle.display_icon2.as_ref(),
                    VerticalPromoImage => bundle.vertical_promo_image.as_ref(),
                    _ => None,
                }
            }
            EntityKind::ContentTier => match field {
                DisplayIcon => self.content_tiers.get(id)?.display_icon.as_ref(),
                _ => None,
            },
        }
    }

    /// Every image referenced by entities of `kind`, without duplicates.
    pub fn images(&self, kind: EntityKind) -> Vec<&AssetImage> {
        let ids: Vec<&String> = match kind {
            EntityKind::Agent => self.agents.keys().collect(),
            EntityKind::Map => self.maps.keys().collect(),
            EntityKind::Weapon => self.weapons.keys().collect(),
            EntityKind::SkinLevel => self.skins_by_level_id.keys().collect(),
            EntityKind::Contract => self.contracts.keys().collect(),
            EntityKind::GameMode => self.game_modes.keys().collect(),
            EntityKind::Queue => self.queues.keys().collect(),
            EntityKind::PlayerCard => self.player_cards.keys().collect(),
            EntityKind::Spray => self.sprays.keys().collect(),
            EntityKind::Buddy => self.buddies.keys().collect(),
            EntityKind::Currency => self.currencies.keys().collect(),
            EntityKind::Bundle => self.bundles.keys().collect(),
            EntityKind::ContentTier => self.content_tiers.keys().collect(),
        };

        let mut seen = HashSet::new();
        let mut images = Vec::new();
        for id in ids {
            for field in ImageField::ALL {
                if let Some(image) = self.image_for(kind, id, field) {
                    if seen.insert(image) {
                        images.push(image);
                    }
                }
            }
        }
        images
    }
}

/// Asset categories that carry images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Agent,
    Map,
    Weapon,
    SkinLevel,
    Contract,
    GameMode,
    Queue,
    PlayerCard,
    Spray,
    Buddy,
    Currency,
    Bundle,
    ContentTier,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Agent,
        EntityKind::Map,
        EntityKind::Weapon,
        EntityKind::SkinLevel,
        EntityKind::Contract,
        EntityKind::GameMode,
        EntityKind::Queue,
        EntityKind::PlayerCard,
        EntityKind::Spray,
        EntityKind::Buddy,
        EntityKind::Currency,
        EntityKind::Bundle,
        EntityKind::ContentTier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Agent => "agent",
            EntityKind::Map => "map",
            EntityKind::Weapon => "weapon",
            EntityKind::SkinLevel => "skin-level",
            EntityKind::Contract => "contract",
            EntityKind::GameMode => "game-mode",
            EntityKind::Queue => "queue",
            EntityKind::PlayerCard => "player-card",
            EntityKind::Spray => "spray",
            EntityKind::Buddy => "buddy",
            EntityKind::Currency => "currency",
            EntityKind::Bundle => "bundle",
            EntityKind::ContentTier => "content-tier",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown entity kind '{0}'")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}

/// Image-valued fields across all entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageField {
    DisplayIcon,
    DisplayIconSmall,
    DisplayIcon2,
    BustPortrait,
    FullPortrait,
    KillfeedPortrait,
    Background,
    RoleIcon,
    ListViewIcon,
    Splash,
    KillStreamIcon,
    Wallpaper,
    SmallArt,
    WideArt,
    LargeArt,
    FullIcon,
    FullTransparentIcon,
    AnimationPng,
    LargeIcon,
    VerticalPromoImage,
}

impl ImageField {
    pub const ALL: [ImageField; 20] = [
        ImageField::DisplayIcon,
        ImageField::DisplayIconSmall,
        ImageField::DisplayIcon2,
        ImageField::BustPortrait,
        ImageField::FullPortrait,
        ImageField::KillfeedPortrait,
        ImageField::Background,
        ImageField::RoleIcon,
        ImageField::ListViewIcon,
        ImageField::Splash,
        ImageField::KillStreamIcon,
        ImageField::Wallpaper,
        ImageField::SmallArt,
        ImageField::WideArt,
        ImageField::LargeArt,
        ImageField::FullIcon,
        ImageField::FullTransparentIcon,
        ImageField::AnimationPng,
        ImageField::LargeIcon,
        ImageField::VerticalPromoImage,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection() -> AssetCollection {
        serde_json::from_value(json!({
            "version": {
                "branch": "release-09.10",
                "version": "release-09.10-shipping-20-2925829",
                "buildVersion": "20",
                "buildDate": "2024-11-19T00:00:00Z",
                "riotClientVersion": "release-09.10-shipping-20-2925829"
            },
            "language": "en-US",
            "maps": {
                "7eaecc1b": {
                    "uuid": "7eaecc1b",
                    "displayName": "Ascent",
                    "splash": "https://media.valorant-api.com/maps/7eaecc1b/splash.png",
                    "mapUrl": "/Game/Maps/Ascent/Ascent"
                }
            },
            "agents": {
                "add6443a": {
                    "uuid": "add6443a",
                    "displayName": "Breach",
                    "displayIcon": "https://media.valorant-api.com/agents/add6443a/displayicon.png",
                    "role": {
                        "uuid": "1b47567f",
                        "displayName": "Initiator",
                        "displayIcon": "https://media.valorant-api.com/agents/roles/1b47567f/displayicon.png"
                    }
                }
            },
            "missions": {}, "contracts": {}, "gameModes": {}, "queues": {},
            "objectives": {}, "playerCards": {}, "playerTitles": {}, "seasons": {},
            "competitiveSeasons": {}, "competitiveTiers": {}, "sprays": {},
            "currencies": {}, "bundles": {}, "contentTiers": {},
            "weapons": {
                "9c82e19d": {
                    "uuid": "9c82e19d",
                    "displayName": "Vandal",
                    "displayIcon": "https://media.valorant-api.com/weapons/9c82e19d/displayicon.png",
                    "skins": [
                        {
                            "uuid": "skin-a",
                            "displayName": "Standard Vandal",
                            "levels": [{ "uuid": "level-a0" }]
                        },
                        {
                            "uuid": "skin-b",
                            "displayName": "Prime Vandal",
                            "displayIcon": "https://media.valorant-api.com/weaponskins/skin-b/displayicon.png",
                            "levels": [
                                { "uuid": "level-b0" },
                                {
                                    "uuid": "level-b1",
                                    "displayIcon": "https://media.valorant-api.com/weaponskinlevels/level-b1/displayicon.png"
                                }
                            ]
                        }
                    ]
                }
            },
            "buddies": {
                "buddy-1": {
                    "uuid": "buddy-1",
                    "displayName": "Buddy",
                    "levels": [{ "uuid": "buddy-level-1", "charmLevel": 1, "displayName": "Buddy" }]
                }
            },
            "skinsByLevelId": {
                "level-a0": { "weapon": "9c82e19d", "skinIndex": 0, "levelIndex": 0 },
                "level-b0": { "weapon": "9c82e19d", "skinIndex": 1, "levelIndex": 0 },
                "level-b1": { "weapon": "9c82e19d", "skinIndex": 1, "levelIndex": 1 }
            },
            "buddiesByLevelId": { "buddy-level-1": "buddy-1" }
        }))
        .expect("fixture should decode")
    }

    #[test]
    fn round_trips_through_json() {
        let original = collection();
        let encoded = serde_json::to_vec(&original).unwrap();
        let decoded: AssetCollection = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn full_precision_floats_round_trip() {
        let mut original = collection();
        let ascent = original.maps.get_mut("7eaecc1b").unwrap();
        ascent.x_multiplier = 4.7630939344047156e-5;
        ascent.y_scalar_to_add = -0.8198939085006714;

        let encoded = serde_json::to_vec(&original).unwrap();
        let decoded: AssetCollection = serde_json::from_slice(&encoded).unwrap();

        let map = &decoded.maps["7eaecc1b"];
        assert_eq!(map.x_multiplier.to_bits(), 4.7630939344047156e-5_f64.to_bits());
        assert_eq!(map.y_scalar_to_add, -0.8198939085006714);
        assert_eq!(decoded, original);
    }

    #[test]
    fn resolves_skin_levels_through_the_derived_table() {
        let assets = collection();
        let resolved = assets.skin_level("level-b1").unwrap();

        assert_eq!(resolved.weapon.display_name, "Vandal");
        assert_eq!(resolved.skin.display_name, "Prime Vandal");
        assert_eq!(resolved.level.uuid, "level-b1");
        assert!(assets.skin_level("unknown").is_none());
    }

    #[test]
    fn resolves_buddy_levels() {
        let assets = collection();
        assert_eq!(assets.buddy_for_level("buddy-level-1").unwrap().uuid, "buddy-1");
        assert!(assets.buddy_for_level("buddy-1").is_none());
    }

    #[test]
    fn skin_level_icon_falls_back_to_skin() {
        let assets = collection();

        let own = assets
            .image_for(EntityKind::SkinLevel, "level-b1", ImageField::DisplayIcon)
            .unwrap();
        assert!(own.url().path().contains("weaponskinlevels"));

        let inherited = assets
            .image_for(EntityKind::SkinLevel, "level-b0", ImageField::DisplayIcon)
            .unwrap();
        assert!(inherited.url().path().contains("weaponskins/skin-b"));

        assert!(assets
            .image_for(EntityKind::SkinLevel, "level-a0", ImageField::DisplayIcon)
            .is_none());
    }

    #[test]
    fn image_for_rejects_fields_of_other_kinds() {
        let assets = collection();
        assert!(assets
            .image_for(EntityKind::Agent, "add6443a", ImageField::Splash)
            .is_none());
        assert!(assets
            .image_for(EntityKind::Map, "7eaecc1b", ImageField::Splash)
            .is_some());
        assert!(assets
            .image_for(EntityKind::Agent, "add6443a", ImageField::RoleIcon)
            .is_some());
    }

    #[test]
    fn images_are_deduplicated_per_kind() {
        let assets = collection();
        // level-b0 inherits the skin icon, which must only be listed once.
        assert_eq!(assets.images(EntityKind::SkinLevel).len(), 2);
        assert_eq!(assets.images(EntityKind::Agent).len(), 2);
    }

    #[test]
    fn lookups_by_game_path() {
        let assets = collection();
        assert_eq!(
            assets.map_for_path("/Game/Maps/Ascent/Ascent").unwrap().display_name,
            "Ascent"
        );
    }

    #[test]
    fn parses_entity_kinds() {
        assert_eq!("skin_level".parse::<EntityKind>(), Ok(EntityKind::SkinLevel));
        assert_eq!("Player-Card".parse::<EntityKind>(), Ok(EntityKind::PlayerCard));
        assert_eq!(
            "gun".parse::<EntityKind>().unwrap_err().to_string(),
            "unknown entity kind 'gun'"
        );
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>(), Ok(kind));
        }
    }
}
