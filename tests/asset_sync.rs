use http::Method;
use radiant::assets::{AssetManager, AssetManagerConfig, LoadOutcome, STORED_KEY};
use radiant::client::AssetClient;
use radiant::fs::FileStore;
use radiant::prelude::*;
use radiant_mock::MockTransport;
use radiant_mock::fixtures::{self, category_hits, endpoint_url, install_asset_api};
use std::path::Path;
use tempfile::tempdir;

const V1: &str = "release-09.10-shipping-20-2925829";
const V2: &str = "release-09.11-shipping-7-2950012";

fn manager(transport: &MockTransport, dir: &Path) -> AssetManager<MockTransport, FileStore> {
    let client = AssetClient::new(fixtures::BASE_URL, transport.clone()).unwrap();
    AssetManager::new(
        client,
        FileStore::new(dir.join("state")),
        AssetManagerConfig::default(),
    )
}

#[tokio::test]
async fn snapshot_survives_a_restart() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new();
    install_asset_api(&transport, V1);

    let first = manager(&transport, dir.path());
    assert!(matches!(first.try_load().await, LoadOutcome::Downloaded));
    let downloaded = first.collection().unwrap();
    assert!(dir.path().join("state").join(STORED_KEY).exists());
    drop(first);
    transport.clear_log();

    let restarted = manager(&transport, dir.path());
    assert!(matches!(restarted.try_load().await, LoadOutcome::Reused));

    assert_eq!(category_hits(&transport), 0);
    assert_eq!(*restarted.collection().unwrap(), *downloaded);
}

#[tokio::test]
async fn restored_snapshot_resolves_cross_references() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new();
    install_asset_api(&transport, V1);
    manager(&transport, dir.path()).try_load().await;

    let restarted = manager(&transport, dir.path());
    let assets = restarted.load_stored().await.unwrap().unwrap();

    let resolved = assets.skin_level("level-vandal-prime-2").unwrap();
    assert_eq!(resolved.weapon.uuid, "weapon-vandal");
    assert_eq!(resolved.skin.uuid, "skin-vandal-prime");
    assert_eq!(assets.buddy_for_level("buddy-level-1").unwrap().uuid, "buddy-1");

    // A level without its own icon falls back to the skin icon.
    let prime_icon = assets.image_for(
        EntityKind::SkinLevel,
        "level-vandal-prime-1",
        ImageField::DisplayIcon,
    );
    assert_eq!(
        prime_icon.unwrap().url().as_str(),
        fixtures::media_url("weaponskins/skin-vandal-prime/displayicon.png")
    );
}

#[tokio::test]
async fn version_bump_refetches_and_persists() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new();
    install_asset_api(&transport, V1);
    manager(&transport, dir.path()).try_load().await;

    fixtures::install_version(&transport, V2);
    transport.clear_log();
    let restarted = manager(&transport, dir.path());

    assert!(matches!(restarted.try_load().await, LoadOutcome::Downloaded));
    assert_eq!(category_hits(&transport), fixtures::CATEGORY_PATHS.len());

    let stored = restarted.load_stored().await.unwrap().unwrap();
    assert_eq!(stored.version.version, V2);
}

#[tokio::test]
async fn language_override_persists_across_restarts() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new();
    install_asset_api(&transport, V1);

    let first = manager(&transport, dir.path());
    first.set_language_override(Some("ja-JP")).await.unwrap();
    drop(first);
    transport.clear_log();

    let restarted = manager(&transport, dir.path());
    assert_eq!(restarted.language().await.unwrap(), "ja-JP");
    assert!(matches!(restarted.try_load().await, LoadOutcome::Reused));
    assert_eq!(transport.hits(Method::GET, &endpoint_url("agents")), 0);
}

#[tokio::test]
async fn reset_then_sync_downloads_again() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new();
    install_asset_api(&transport, V1);
    let manager = manager(&transport, dir.path());
    manager.try_load().await;

    manager.reset().await.unwrap();
    assert!(!dir.path().join("state").join(STORED_KEY).exists());
    transport.clear_log();

    assert!(matches!(manager.try_load().await, LoadOutcome::Downloaded));
    assert_eq!(category_hits(&transport), fixtures::CATEGORY_PATHS.len());
}
