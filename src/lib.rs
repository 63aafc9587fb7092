pub use radiant_core::*;

#[cfg(feature = "client")]
pub mod client {
    pub use radiant_client::*;
}

#[cfg(feature = "assets")]
pub mod assets {
    pub use radiant_assets::*;
}

#[cfg(feature = "images")]
pub mod images {
    pub use radiant_images::*;
}

#[cfg(feature = "fs")]
pub mod fs {
    pub use radiant_fs::*;
}

#[cfg(feature = "mock")]
pub mod mock {
    pub use radiant_mock::*;
}

pub mod prelude {
    pub use radiant_core::prelude::*;

    #[cfg(feature = "client")]
    pub use radiant_client::{AssetClient, AssetClientConfig, ReqwestTransport, RequestClient};

    #[cfg(feature = "assets")]
    pub use radiant_assets::{AssetManager, AssetManagerConfig, AssetState, LoadPhase};

    #[cfg(feature = "images")]
    pub use radiant_images::{ImageLookup, ImageManager, ImageManagerConfig, ImageState};

    #[cfg(feature = "fs")]
    pub use radiant_fs::FileStore;

    #[cfg(feature = "mock")]
    pub use radiant_mock::MockTransport;
}
