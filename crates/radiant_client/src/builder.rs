//! Assembles an [`AssetCollection`] from every asset endpoint.

use crate::assets::AssetClient;
use crate::Result;

use futures::try_join;
use radiant_core::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

/// Fetches every category concurrently and builds the derived tables.
///
/// All requests are in flight at once. The first failure fails the whole
/// build, so no partial collection is ever returned.
pub async fn build_collection<T: HttpTransport>(
    client: &AssetClient<T>,
    version: AssetVersion,
    language: &str,
) -> Result<AssetCollection> {
    info!(version = %version.version, language, "Fetching asset collection");

    let (
        maps,
        agents,
        missions,
        contracts,
        game_modes,
        queues,
        objectives,
        player_cards,
        player_titles,
        weapons,
        seasons,
        competitive_seasons,
        competitive_tiers,
        sprays,
        buddies,
        currencies,
        bundles,
        content_tiers,
    ) = try_join!(
        client.fetch_maps(language),
        client.fetch_agents(language),
        client.fetch_missions(language),
        client.fetch_contracts(language),
        client.fetch_game_modes(language),
        client.fetch_queues(language),
        client.fetch_objectives(language),
        client.fetch_player_cards(language),
        client.fetch_player_titles(language),
        client.fetch_weapons(language),
        client.fetch_seasons(language),
        client.fetch_competitive_seasons(language),
        client.fetch_competitive_tiers(language),
        client.fetch_sprays(language),
        client.fetch_buddies(language),
        client.fetch_currencies(language),
        client.fetch_bundles(language),
        client.fetch_content_tiers(language),
    )?;

    let weapons = by_uuid(weapons, |weapon| &weapon.uuid);
    let buddies = by_uuid(buddies, |buddy| &buddy.uuid);
    let skins_by_level_id = index_skin_levels(&weapons);
    let buddies_by_level_id = index_buddy_levels(&buddies);
    debug!(
        skin_levels = skins_by_level_id.len(),
        buddy_levels = buddies_by_level_id.len(),
        "Built derived tables"
    );

    Ok(AssetCollection {
        version,
        language: language.to_string(),
        maps: by_uuid(maps, |map| &map.uuid),
        agents: by_uuid(agents, |agent| &agent.uuid),
        missions: by_uuid(missions, |mission| &mission.uuid),
        contracts: by_uuid(contracts, |contract| &contract.uuid),
        game_modes: by_uuid(game_modes, |mode| &mode.uuid),
        queues: by_uuid(queues, |queue| &queue.uuid),
        objectives: by_uuid(objectives, |objective| &objective.uuid),
        player_cards: by_uuid(player_cards, |card| &card.uuid),
        player_titles: by_uuid(player_titles, |title| &title.uuid),
        weapons,
        seasons: by_uuid(seasons, |season| &season.uuid),
        competitive_seasons: by_uuid(competitive_seasons, |season| &season.uuid),
        competitive_tiers: by_uuid(competitive_tiers, |table| &table.uuid),
        sprays: by_uuid(sprays, |spray| &spray.uuid),
        buddies,
        currencies: by_uuid(currencies, |currency| &currency.uuid),
        bundles: by_uuid(bundles, |bundle| &bundle.uuid),
        content_tiers: by_uuid(content_tiers, |tier| &tier.uuid),
        skins_by_level_id,
        buddies_by_level_id,
    })
}

fn by_uuid<T>(items: Vec<T>, key: impl Fn(&T) -> &String) -> HashMap<String, T> {
    items
        .into_iter()
        .map(|item| (key(&item).clone(), item))
        .collect()
}

/// Maps every skin level ID to its weapon, skin index and level index.
pub fn index_skin_levels(weapons: &HashMap<String, Weapon>) -> HashMap<String, WeaponSkinLevelPath> {
    let mut index = HashMap::new();
    for (weapon_id, weapon) in weapons {
        for (skin_index, skin) in weapon.skins.iter().enumerate() {
            for (level_index, level) in skin.levels.iter().enumerate() {
                index.insert(
                    level.uuid.clone(),
                    WeaponSkinLevelPath {
                        weapon: weapon_id.clone(),
                        skin_index,
                        level_index,
                    },
                );
            }
        }
    }
    index
}

/// Maps every buddy level ID to its buddy.
pub fn index_buddy_levels(buddies: &HashMap<String, Buddy>) -> HashMap<String, String> {
    buddies
        .iter()
        .flat_map(|(buddy_id, buddy)| {
            buddy
                .levels
                .iter()
                .map(move |level| (level.uuid.clone(), buddy_id.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use radiant_mock::MockTransport;
    use serde_json::json;

    const BASE: &str = "https://assets.test";

    fn skin(uuid: &str, levels: &[&str]) -> serde_json::Value {
        json!({
            "uuid": uuid,
            "displayName": uuid,
            "levels": levels.iter().map(|l| json!({ "uuid": l })).collect::<Vec<_>>(),
        })
    }

    fn mock_api() -> MockTransport {
        let transport = MockTransport::new();
        let empty = [
            "maps",
            "missions",
            "contracts",
            "gamemodes",
            "gamemodes/queues",
            "objectives",
            "playercards",
            "playertitles",
            "seasons",
            "seasons/competitive",
            "competitivetiers",
            "sprays",
            "currencies",
            "bundles",
            "contenttiers",
        ];
        for path in empty {
            transport.on_json(
                Method::GET,
                &format!("{BASE}/v1/{path}"),
                json!({ "status": 200, "data": [] }),
            );
        }

        transport.on_json(
            Method::GET,
            &format!("{BASE}/v1/agents"),
            json!({ "status": 200, "data": [
                {
                    "uuid": "agent-1",
                    "displayName": "Jett",
                    "displayIcon": "https://media.test/agents/agent-1/displayicon.png"
                },
                { "uuid": "agent-broken" }
            ]}),
        );
        transport.on_json(
            Method::GET,
            &format!("{BASE}/v1/weapons"),
            json!({ "status": 200, "data": [
                {
                    "uuid": "vandal",
                    "displayName": "Vandal",
                    "displayIcon": "https://media.test/weapons/vandal/displayicon.png",
                    "skins": [skin("v-standard", &["v-standard-1"]), skin("v-prime", &["v-prime-1", "v-prime-2"])]
                },
                {
                    "uuid": "phantom",
                    "displayName": "Phantom",
                    "displayIcon": "https://media.test/weapons/phantom/displayicon.png",
                    "skins": [skin("p-standard", &["p-standard-1"])]
                }
            ]}),
        );
        transport.on_json(
            Method::GET,
            &format!("{BASE}/v1/buddies"),
            json!({ "status": 200, "data": [
                {
                    "uuid": "buddy",
                    "displayName": "Buddy",
                    "levels": [{ "uuid": "buddy-l1", "charmLevel": 1, "displayName": "Buddy" }]
                }
            ]}),
        );
        transport
    }

    fn version() -> AssetVersion {
        serde_json::from_value(json!({
            "branch": "release-09.10",
            "version": "release-09.10-shipping-20-2925829",
            "buildVersion": "20",
            "buildDate": "2024-11-19T00:00:00Z",
            "riotClientVersion": "release-09.10-shipping-20-2925829"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn builds_derived_tables_from_nested_lists() {
        let transport = mock_api();
        let client = AssetClient::new(BASE, transport.clone()).unwrap();

        let assets = build_collection(&client, version(), "en-US").await.unwrap();

        assert_eq!(assets.language, "en-US");
        assert_eq!(assets.agents.len(), 1);
        assert_eq!(
            assets.skins_by_level_id["v-prime-2"],
            WeaponSkinLevelPath {
                weapon: "vandal".into(),
                skin_index: 1,
                level_index: 1,
            }
        );
        assert_eq!(assets.skins_by_level_id["p-standard-1"].weapon, "phantom");
        assert_eq!(assets.skins_by_level_id.len(), 4);
        assert_eq!(assets.buddies_by_level_id["buddy-l1"], "buddy");

        let resolved = assets.skin_level("v-prime-2").unwrap();
        assert_eq!(resolved.skin.uuid, "v-prime");
    }

    #[tokio::test]
    async fn requests_every_category_once_with_language() {
        let transport = mock_api();
        let client = AssetClient::new(BASE, transport.clone()).unwrap();

        build_collection(&client, version(), "fr-FR").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 18);
        assert!(requests.iter().all(|r| r.url.contains("language=fr-FR")));
    }

    #[tokio::test]
    async fn one_failing_endpoint_fails_the_build() {
        let transport = mock_api();
        transport.fail(Method::GET, &format!("{BASE}/v1/sprays"), "connection reset");
        let client = AssetClient::new(BASE, transport).unwrap();

        let result = build_collection(&client, version(), "en-US").await;

        assert!(matches!(result, Err(crate::ClientError::Transport(_))));
    }

    #[tokio::test]
    async fn malformed_strict_category_fails_the_build() {
        let transport = mock_api();
        transport.on_json(
            Method::GET,
            &format!("{BASE}/v1/maps"),
            json!({ "status": 200, "data": [{ "uuid": "no-name" }] }),
        );
        let client = AssetClient::new(BASE, transport).unwrap();

        let err = build_collection(&client, version(), "en-US").await.unwrap_err();

        assert!(err.payload().is_some());
    }
}
