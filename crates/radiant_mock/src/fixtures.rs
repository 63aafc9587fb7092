//! A small but complete asset API to script a [`MockTransport`] with.

use crate::MockTransport;
use http::Method;
use serde_json::{Value, json};

pub const BASE_URL: &str = "https://assets.test";
pub const MEDIA_URL: &str = "https://media.test";

/// Every list endpoint the collection builder requests, relative to `/v1/`.
pub const CATEGORY_PATHS: [&str; 18] = [
    "agents",
    "maps",
    "weapons",
    "missions",
    "objectives",
    "contracts",
    "gamemodes",
    "gamemodes/queues",
    "playercards",
    "playertitles",
    "seasons",
    "seasons/competitive",
    "competitivetiers",
    "sprays",
    "buddies",
    "currencies",
    "bundles",
    "contenttiers",
];

pub fn endpoint_url(path: &str) -> String {
    format!("{BASE_URL}/v1/{path}")
}

pub fn media_url(path: &str) -> String {
    format!("{MEDIA_URL}/{path}")
}

fn envelope(data: Value) -> Value {
    json!({ "status": 200, "data": data })
}

pub fn version_payload(version: &str) -> Value {
    envelope(json!({
        "manifestId": "C330B9D0A1B2C3D4",
        "branch": "release-09.10",
        "version": version,
        "buildVersion": "20",
        "engineVersion": "4.27.2.0",
        "riotClientVersion": format!("{version}-client"),
        "riotClientBuild": "94.0.0.1234",
        "buildDate": "2024-11-19T00:00:00Z"
    }))
}

/// Answers `/v1/version` with `version`.
pub fn install_version(transport: &MockTransport, version: &str) {
    transport.on_json(Method::GET, &endpoint_url("version"), version_payload(version));
}

/// Registers the version endpoint and every category endpoint.
pub fn install_asset_api(transport: &MockTransport, version: &str) {
    install_version(transport, version);
    for path in CATEGORY_PATHS {
        transport.on_json(Method::GET, &endpoint_url(path), envelope(category(path)));
    }
}

/// Number of category requests recorded by `transport`.
pub fn category_hits(transport: &MockTransport) -> usize {
    CATEGORY_PATHS
        .iter()
        .map(|path| transport.hits(Method::GET, &endpoint_url(path)))
        .sum()
}

fn category(path: &str) -> Value {
    match path {
        "agents" => json!([
            {
                "uuid": "agent-jett",
                "displayName": "Jett",
                "description": "Representing her home country of South Korea.",
                "developerName": "Wushu",
                "displayIcon": media_url("agents/agent-jett/displayicon.png"),
                "fullPortrait": media_url("agents/agent-jett/fullportrait.png"),
                "isPlayableCharacter": true,
                "role": {
                    "uuid": "role-duelist",
                    "displayName": "Duelist",
                    "description": "Duelists are self-sufficient fraggers.",
                    "displayIcon": media_url("agents/roles/role-duelist/displayicon.png")
                },
                "abilities": [
                    { "slot": "Ultimate", "displayName": "Blade Storm", "description": "", "displayIcon": null }
                ]
            },
            { "uuid": "agent-broken", "displayName": null }
        ]),
        "maps" => json!([
            {
                "uuid": "map-ascent",
                "displayName": "Ascent",
                "coordinates": "45°26'BF'N,12°20'Q'E",
                "displayIcon": media_url("maps/map-ascent/displayicon.png"),
                "splash": media_url("maps/map-ascent/splash.png"),
                "mapUrl": "/Game/Maps/Ascent/Ascent",
                "xMultiplier": 0.00007,
                "yMultiplier": -0.00007,
                "xScalarToAdd": 0.813895,
                "yScalarToAdd": 0.573242
            }
        ]),
        "weapons" => json!([
            {
                "uuid": "weapon-vandal",
                "displayName": "Vandal",
                "category": "EEquippableCategory::Rifle",
                "defaultSkinUuid": "skin-vandal-standard",
                "displayIcon": media_url("weapons/weapon-vandal/displayicon.png"),
                "shopData": { "cost": 2900, "category": "Rifles", "categoryText": "Rifles", "newImage": null },
                "weaponStats": { "fireRate": 9.75, "magazineSize": 25 },
                "skins": [
                    {
                        "uuid": "skin-vandal-standard",
                        "displayName": "Standard Vandal",
                        "contentTierUuid": null,
                        "displayIcon": null,
                        "chromas": [],
                        "levels": [{ "uuid": "level-vandal-standard-1", "displayName": "Standard Vandal" }]
                    },
                    {
                        "uuid": "skin-vandal-prime",
                        "displayName": "Prime Vandal",
                        "contentTierUuid": "tier-premium",
                        "displayIcon": media_url("weaponskins/skin-vandal-prime/displayicon.png"),
                        "chromas": [
                            { "uuid": "chroma-prime-1", "displayName": "Prime Vandal", "fullRender": media_url("weaponskinchromas/chroma-prime-1/fullrender.png") }
                        ],
                        "levels": [
                            { "uuid": "level-vandal-prime-1", "displayName": "Prime Vandal" },
                            {
                                "uuid": "level-vandal-prime-2",
                                "displayName": "Prime Vandal Level 2",
                                "levelItem": "EEquippableSkinLevelItem::VFX",
                                "displayIcon": media_url("weaponskinlevels/level-vandal-prime-2/displayicon.png")
                            }
                        ]
                    }
                ]
            }
        ]),
        "missions" => json!([
            {
                "uuid": "mission-daily",
                "displayName": "Daily",
                "title": "Win 2 matches",
                "type": "EAresMissionType::Daily",
                "xpGrant": 2000,
                "progressToComplete": 2,
                "objectives": [{ "objectiveUuid": "objective-win", "value": 2 }]
            }
        ]),
        "objectives" => json!([
            { "uuid": "objective-win", "directive": "Win matches", "assetPath": "ShooterGame/Content/Objectives/Win" }
        ]),
        "contracts" => json!([
            {
                "uuid": "contract-jett",
                "displayName": "Jett Contract",
                "displayIcon": null,
                "shipIt": true,
                "content": {
                    "relationType": "Agent",
                    "relationUuid": "agent-jett",
                    "chapters": [
                        {
                            "isEpilogue": false,
                            "levels": [
                                { "reward": { "type": "Spray", "uuid": "spray-1", "amount": 1, "isHighlighted": false }, "xp": 20000, "vpCost": 200, "isPurchasableWithVP": true },
                                { "reward": { "type": "EquippableCharmLevel", "uuid": "buddy-level-1", "amount": 1, "isHighlighted": true }, "xp": 30000, "vpCost": 200, "isPurchasableWithVP": true }
                            ],
                            "freeRewards": null
                        }
                    ],
                    "premiumRewardScheduleUuid": null,
                    "premiumVPCost": -1
                }
            }
        ]),
        "gamemodes" => json!([
            {
                "uuid": "mode-standard",
                "displayName": "Standard",
                "duration": "30-40 min",
                "allowsMatchTimeouts": true,
                "isTeamVoiceAllowed": true,
                "isMinimapHidden": false,
                "orbCount": 4,
                "roundsPerHalf": 12,
                "displayIcon": media_url("gamemodes/mode-standard/displayicon.png"),
                "assetPath": "ShooterGame/Content/GameModes/Bomb/BombGameMode"
            }
        ]),
        "gamemodes/queues" => json!([
            {
                "uuid": "queue-competitive",
                "queueId": "competitive",
                "displayName": "Competitive",
                "description": "Ranked Standard",
                "dropdownText": "Competitive",
                "selectedText": "COMPETITIVE",
                "isBeta": false,
                "displayIcon": null
            }
        ]),
        "playercards" => json!([
            {
                "uuid": "card-default",
                "displayName": "VALORANT Card",
                "isHiddenIfNotOwned": false,
                "themeUuid": null,
                "displayIcon": media_url("playercards/card-default/displayicon.png"),
                "smallArt": media_url("playercards/card-default/smallart.png"),
                "wideArt": media_url("playercards/card-default/wideart.png"),
                "largeArt": media_url("playercards/card-default/largeart.png")
            }
        ]),
        "playertitles" => json!([
            { "uuid": "title-empty", "displayName": null, "titleText": null, "isHiddenIfNotOwned": false },
            { "uuid": "title-cool", "displayName": "Cool Title", "titleText": "Cool", "isHiddenIfNotOwned": false }
        ]),
        "seasons" => json!([
            {
                "uuid": "season-e9a3",
                "displayName": "ACT III",
                "type": "EAresSeasonType::Act",
                "startTime": "2024-10-22T00:00:00Z",
                "endTime": "2025-01-08T00:00:00Z",
                "parentUuid": "season-e9"
            }
        ]),
        "seasons/competitive" => json!([
            {
                "uuid": "compseason-e9a3",
                "startTime": "2024-10-22T00:00:00Z",
                "endTime": "2025-01-08T00:00:00Z",
                "seasonUuid": "season-e9a3",
                "competitiveTiersUuid": "tiers-e9",
                "borders": null
            }
        ]),
        "competitivetiers" => json!([
            {
                "uuid": "tiers-e9",
                "assetObjectName": "Episode9_CompetitiveTierDataTable",
                "tiers": [
                    { "tier": 0, "tierName": "UNRANKED", "division": "ECompetitiveDivision::UNRANKED", "divisionName": "UNRANKED", "color": "ffffffff", "backgroundColor": "00000000", "smallIcon": media_url("competitivetiers/tiers-e9/0/smallicon.png"), "largeIcon": media_url("competitivetiers/tiers-e9/0/largeicon.png") },
                    { "tier": 12, "tierName": "GOLD 1", "division": "ECompetitiveDivision::GOLD", "divisionName": "GOLD", "color": "eccf56ff", "backgroundColor": "ecd056ff", "smallIcon": media_url("competitivetiers/tiers-e9/12/smallicon.png"), "largeIcon": null }
                ]
            }
        ]),
        "sprays" => json!([
            {
                "uuid": "spray-1",
                "displayName": "Jett Spray",
                "category": null,
                "displayIcon": media_url("sprays/spray-1/displayicon.png"),
                "fullTransparentIcon": media_url("sprays/spray-1/fulltransparenticon.png"),
                "levels": [{ "uuid": "spray-level-1", "sprayLevel": 1, "displayName": "Jett Spray", "displayIcon": null }]
            }
        ]),
        "buddies" => json!([
            {
                "uuid": "buddy-1",
                "displayName": "Jett Buddy",
                "isHiddenIfNotOwned": false,
                "displayIcon": media_url("buddies/buddy-1/displayicon.png"),
                "levels": [{ "uuid": "buddy-level-1", "charmLevel": 1, "displayName": "Jett Buddy", "displayIcon": media_url("buddies/buddy-1/displayicon.png") }]
            }
        ]),
        "currencies" => json!([
            {
                "uuid": "currency-vp",
                "displayName": "VALORANT Points",
                "displayNameSingular": "VALORANT Point",
                "displayIcon": media_url("currencies/currency-vp/displayicon.png"),
                "largeIcon": media_url("currencies/currency-vp/largeicon.png")
            }
        ]),
        "bundles" => json!([
            {
                "uuid": "bundle-prime",
                "displayName": "Prime",
                "description": "Prime",
                "displayIcon": media_url("bundles/bundle-prime/displayicon.png"),
                "displayIcon2": media_url("bundles/bundle-prime/displayicon2.png"),
                "verticalPromoImage": null
            }
        ]),
        "contenttiers" => json!([
            {
                "uuid": "tier-premium",
                "displayName": "Premium Edition",
                "devName": "Premium",
                "rank": 3,
                "juiceValue": 30,
                "juiceCost": 30,
                "highlightColor": "d1548db3",
                "displayIcon": media_url("contenttiers/tier-premium/displayicon.png")
            }
        ]),
        _ => json!([]),
    }
}
