use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use radiant_assets::{AssetManager, AssetManagerConfig, LoadOutcome};
use radiant_client::{AssetClient, AssetClientConfig, DEFAULT_BASE_URL, ReqwestTransport};
use radiant_core::prelude::*;
use radiant_fs::FileStore;
use radiant_images::{ImageManager, ImageManagerConfig, ImageState};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "radiant")]
#[command(about = "Sync and inspect the Valorant asset catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Asset API URL
    #[arg(short, long, env = "RADIANT_API_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Directory holding the stored catalog and the image cache
    #[arg(short, long, env = "RADIANT_DATA_DIR", default_value = "radiant_data")]
    data_dir: PathBuf,

    /// Default language when no override is stored
    #[arg(short, long, env = "RADIANT_LANGUAGE", default_value = "en-US")]
    language: String,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bring the stored catalog up to date
    Sync,
    /// Show the remote catalog version
    Version,
    /// Print one entity and its images
    Show {
        /// e.g. "agent", "weapon", "skin-level"
        kind: EntityKind,
        id: String,
    },
    /// Download every image of one entity kind
    Images { kind: EntityKind },
    /// Show, set or clear the language override
    Language {
        /// e.g. "de-DE"
        code: Option<String>,
        #[arg(long, conflicts_with = "code")]
        clear: bool,
    },
    /// Forget the stored catalog
    Reset,
    /// Delete every cached image
    ClearImages,
    /// Report stored catalog and image cache usage
    CacheStats,
}

type Manager = AssetManager<ReqwestTransport, FileStore>;

struct App {
    client: AssetClient<ReqwestTransport>,
    assets: Manager,
    images_dir: PathBuf,
}

impl App {
    fn new(cli: &Cli) -> anyhow::Result<Self> {
        let client = AssetClient::from_config(&AssetClientConfig {
            base_url: cli.url.clone(),
            timeout: cli.timeout.map(Duration::from_secs),
        })?;
        let store = FileStore::new(cli.data_dir.join("state"));
        let assets = AssetManager::new(
            client.clone(),
            store,
            AssetManagerConfig {
                default_language: cli.language.clone(),
            },
        );

        Ok(Self {
            client,
            assets,
            images_dir: cli.data_dir.join("images"),
        })
    }

    fn images(&self, version: Option<String>) -> ImageManager<ReqwestTransport> {
        ImageManager::new(
            self.client.clone(),
            ImageManagerConfig {
                cache_dir: self.images_dir.clone(),
                version,
                ..Default::default()
            },
        )
    }

    /// The stored catalog, syncing first if there is none.
    async fn collection(&self) -> anyhow::Result<Arc<AssetCollection>> {
        if let Some(stored) = self.assets.load_stored().await? {
            return Ok(Arc::new(stored));
        }

        println!("No stored catalog, syncing...");
        report(self.assets.try_load().await)?;
        self.assets
            .collection()
            .context("Sync finished without a catalog")
    }
}

fn report(outcome: LoadOutcome) -> anyhow::Result<()> {
    match outcome {
        LoadOutcome::AlreadyLoading => println!("⏳ A sync is already running."),
        LoadOutcome::Reused => println!("✅ Catalog is up to date."),
        LoadOutcome::Downloaded => println!("✅ Downloaded a new catalog."),
        LoadOutcome::Discarded => println!("🗑️ The catalog was reset during the sync."),
        LoadOutcome::Failed(e) => bail!("Sync failed: {e}"),
    }
    Ok(())
}

fn summarize(assets: &AssetCollection) {
    println!(
        "Version {} ({}), language {}",
        assets.version.version, assets.version.build_date, assets.language
    );
    for kind in EntityKind::ALL {
        println!("  {:<14} {}", kind.name(), assets.len(kind));
    }
}

fn entity_json(assets: &AssetCollection, kind: EntityKind, id: &str) -> anyhow::Result<Option<Value>> {
    fn encode<T: Serialize>(entity: Option<&T>) -> anyhow::Result<Option<Value>> {
        Ok(entity.map(serde_json::to_value).transpose()?)
    }

    match kind {
        EntityKind::Agent => encode(assets.agents.get(id)),
        EntityKind::Map => encode(assets.maps.get(id)),
        EntityKind::Weapon => encode(assets.weapons.get(id)),
        EntityKind::SkinLevel => match assets.skin_level(id) {
            Some(resolved) => Ok(Some(json!({
                "weapon": resolved.weapon.display_name,
                "skin": resolved.skin.display_name,
                "level": serde_json::to_value(resolved.level)?,
            }))),
            None => Ok(None),
        },
        EntityKind::Contract => encode(assets.contracts.get(id)),
        EntityKind::GameMode => encode(assets.game_modes.get(id)),
        EntityKind::Queue => encode(assets.queues.get(id)),
        EntityKind::PlayerCard => encode(assets.player_cards.get(id)),
        EntityKind::Spray => encode(assets.sprays.get(id)),
        EntityKind::Buddy => encode(assets.buddies.get(id)),
        EntityKind::Currency => encode(assets.currencies.get(id)),
        EntityKind::Bundle => encode(assets.bundles.get(id)),
        EntityKind::ContentTier => encode(assets.content_tiers.get(id)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::new(&cli)?;
    debug!(url = %cli.url, data_dir = ?cli.data_dir, "Configured");

    match cli.command {
        Commands::Sync => {
            println!("🔄 Syncing catalog from {}...", cli.url);
            report(app.assets.try_load().await)?;
            if let Some(assets) = app.assets.collection() {
                summarize(&assets);
            }
        }
        Commands::Version => {
            let version = app.client.fetch_version().await?;
            println!("{}", serde_json::to_string_pretty(&version)?);
        }
        Commands::Show { kind, id } => {
            let assets = app.collection().await?;
            let Some(entity) = entity_json(&assets, kind, &id)? else {
                bail!("No {kind} with id '{id}'");
            };
            println!("{}", serde_json::to_string_pretty(&entity)?);

            for field in ImageField::ALL {
                if let Some(image) = assets.image_for(kind, &id, field) {
                    println!("  {field:?}: {image}");
                }
            }
        }
        Commands::Images { kind } => {
            let assets = app.collection().await?;
            let images = app.images(Some(assets.version.version.clone()));

            println!("📥 Fetching {} images...", kind);
            let results = images.prefetch(&assets, &[kind]).await;

            let mut failed = 0;
            for (image, state) in &results {
                if let ImageState::Errored(e) = state {
                    failed += 1;
                    println!("  ❌ {image}: {e}");
                }
            }
            println!(
                "✅ {} of {} images available in {:?}",
                results.len() - failed,
                results.len(),
                images.cache_dir()
            );
        }
        Commands::Language { code, clear } => {
            if code.is_none() && !clear {
                let current = app.assets.language_override().await?;
                match current {
                    Some(language) => println!("Language override: {language}"),
                    None => println!("No override, using {}", app.assets.language().await?),
                }
                return Ok(());
            }

            report(app.assets.set_language_override(code.as_deref()).await?)?;
            println!("Language is now {}", app.assets.language().await?);
        }
        Commands::Reset => {
            app.assets.reset().await?;
            println!("🗑️ Stored catalog removed.");
        }
        Commands::ClearImages => {
            app.images(None).clear_all().await?;
            println!("🗑️ Image cache cleared.");
        }
        Commands::CacheStats => {
            match app.assets.load_stored().await? {
                Some(assets) => summarize(&assets),
                None => println!("No stored catalog."),
            }

            let usage = app.images(None).disk_usage().await?;
            println!(
                "Image cache: {} files, {:.1} MiB in {:?}",
                usage.files,
                usage.bytes as f64 / (1024.0 * 1024.0),
                app.images_dir
            );
        }
    }

    Ok(())
}
