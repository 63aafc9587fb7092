use crate::ImageError;
use radiant_core::image::AssetImage;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub enum ImageState {
    /// Never requested since the last reset.
    #[default]
    Absent,
    Downloading,
    Available,
    Errored(Arc<ImageError>),
}

impl ImageState {
    pub fn is_available(&self) -> bool {
        matches!(self, ImageState::Available)
    }

    pub fn error(&self) -> Option<&Arc<ImageError>> {
        match self {
            ImageState::Errored(e) => Some(e),
            _ => None,
        }
    }
}

/// State changes collected over one batch window. Only the latest state of
/// each image is kept.
#[derive(Debug, Clone, Default)]
pub struct ImageStateBatch {
    pub states: HashMap<AssetImage, ImageState>,
}

impl ImageStateBatch {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, image: &AssetImage) -> Option<&ImageState> {
        self.states.get(image)
    }

    fn record(&mut self, event: ImageEvent) {
        self.states.insert(event.image, event.state);
    }
}

#[derive(Debug)]
pub(crate) struct ImageEvent {
    pub image: AssetImage,
    pub state: ImageState,
}

/// Collects events and publishes them as one batch per `window`.
///
/// The window opens with the first event after a quiet period. The task ends
/// once every event sender is dropped, flushing what it holds.
pub(crate) fn spawn_batcher(
    window: Duration,
    mut events: mpsc::UnboundedReceiver<ImageEvent>,
    batches: broadcast::Sender<ImageStateBatch>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(first) = events.recv().await {
            let mut batch = ImageStateBatch::default();
            batch.record(first);

            let deadline = tokio::time::sleep(window);
            tokio::pin!(deadline);
            let mut closed = false;
            loop {
                tokio::select! {
                    _ = &mut deadline => break,
                    event = events.recv() => match event {
                        Some(event) => batch.record(event),
                        None => {
                            closed = true;
                            break;
                        }
                    },
                }
            }

            trace!(images = batch.len(), "Publishing image state batch");
            // No subscribers is not an error.
            let _ = batches.send(batch);
            if closed {
                break;
            }
        }
    })
}
