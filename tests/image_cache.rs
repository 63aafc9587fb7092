use http::Method;
use image::{DynamicImage, ImageFormat, RgbaImage};
use radiant::assets::{AssetManager, AssetManagerConfig};
use radiant::client::AssetClient;
use radiant::images::{DiskUsage, ImageLookup, ImageManager, ImageManagerConfig, ImageState};
use radiant::prelude::*;
use radiant_mock::MockTransport;
use radiant_mock::fixtures::{self, install_asset_api};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tempfile::{TempDir, tempdir};

const V1: &str = "release-09.10-shipping-20-2925829";

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::new(width, height))
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
        .unwrap();
    data
}

struct Harness {
    _dir: TempDir,
    transport: MockTransport,
    assets: Arc<AssetCollection>,
    images: ImageManager<MockTransport>,
}

/// Syncs the fixture catalog and serves every image it references, splash
/// art at full size and everything else as small icons.
async fn harness() -> Harness {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new();
    install_asset_api(&transport, V1);
    let client = AssetClient::new(fixtures::BASE_URL, transport.clone()).unwrap();

    let manager = AssetManager::new(client.clone(), MemoryStore::new(), AssetManagerConfig::default());
    manager.try_load().await;
    let assets = manager.collection().unwrap();

    for kind in EntityKind::ALL {
        for image in assets.images(kind) {
            let url = image.url().as_str();
            let data = if url.ends_with("splash.png") {
                png(512, 288)
            } else {
                png(64, 64)
            };
            transport.serve_file(url, data);
        }
    }
    transport.clear_log();

    let images = ImageManager::new(
        client,
        ImageManagerConfig {
            cache_dir: dir.path().join("images"),
            version: Some(assets.version.version.clone()),
            ..Default::default()
        },
    );

    Harness {
        _dir: dir,
        transport,
        assets,
        images,
    }
}

#[tokio::test]
async fn prefetch_downloads_every_referenced_image() {
    let h = harness().await;

    let results = h
        .images
        .prefetch(&h.assets, &[EntityKind::Agent, EntityKind::Map])
        .await;

    let expected = h.assets.images(EntityKind::Agent).len() + h.assets.images(EntityKind::Map).len();
    assert_eq!(results.len(), expected);
    assert!(results.iter().all(|(_, state)| state.is_available()));

    let usage = h.images.disk_usage().await.unwrap();
    assert_eq!(usage.files, expected as u64);
}

#[tokio::test]
async fn second_prefetch_for_same_version_stays_offline() {
    let h = harness().await;
    h.images.prefetch(&h.assets, &[EntityKind::Weapon]).await;
    h.transport.clear_log();

    let results = h.images.prefetch(&h.assets, &[EntityKind::Weapon]).await;

    assert!(results.iter().all(|(_, state)| state.is_available()));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn memory_cache_keeps_icons_but_not_splash_art() {
    let h = harness().await;
    h.images.prefetch(&h.assets, &[EntityKind::Map]).await;

    let map = &h.assets.maps["map-ascent"];
    let icon = map.display_icon.as_ref().unwrap();
    let splash = map.splash.as_ref().unwrap();

    let (first, second) = (h.images.lookup(icon), h.images.lookup(icon));
    assert!(Arc::ptr_eq(first.bitmap().unwrap(), second.bitmap().unwrap()));

    assert!(matches!(h.images.lookup(splash), ImageLookup::TooLarge));
    let bitmap = h.images.cache().load(splash).unwrap().unwrap();
    assert_eq!((bitmap.width(), bitmap.height()), (512, 288));
}

#[tokio::test]
async fn duplicate_requests_fetch_once() {
    let h = harness().await;
    h.transport.set_latency(Duration::from_millis(10));
    let card = h
        .assets
        .image_for(EntityKind::PlayerCard, "card-default", ImageField::LargeArt)
        .unwrap()
        .clone();

    let states = futures::future::join_all((0..5).map(|_| h.images.download(&card))).await;

    assert!(states.iter().all(ImageState::is_available));
    assert_eq!(h.transport.hits(Method::GET, card.url().as_str()), 1);
    assert_eq!(h.transport.hits(Method::HEAD, card.url().as_str()), 1);
}

#[tokio::test]
async fn one_failing_image_does_not_affect_others() {
    let h = harness().await;
    let spray = &h.assets.sprays["spray-1"];
    let broken = spray.full_transparent_icon.as_ref().unwrap();
    h.transport
        .fail(Method::GET, broken.url().as_str(), "connection reset");

    let results = h.images.prefetch(&h.assets, &[EntityKind::Spray]).await;

    for (image, state) in results {
        if &image == broken {
            assert!(state.error().is_some());
        } else {
            assert!(state.is_available());
        }
    }
    assert!(h.images.state(broken).error().is_some());
}

#[tokio::test]
async fn clearing_twice_leaves_an_empty_cache() {
    let h = harness().await;
    h.images.prefetch(&h.assets, &[EntityKind::Buddy]).await;

    h.images.clear_all().await.unwrap();
    h.images.clear_all().await.unwrap();

    assert_eq!(h.images.disk_usage().await.unwrap(), DiskUsage::default());
    let icon = h.assets.buddies["buddy-1"].display_icon.as_ref().unwrap();
    assert!(matches!(h.images.state(icon), ImageState::Absent));
    assert!(matches!(h.images.lookup(icon), ImageLookup::Missing));

    h.transport.clear_log();
    assert!(h.images.download(icon).await.is_available());
    assert_eq!(h.transport.hits(Method::GET, icon.url().as_str()), 1);
}
