pub mod collection;
pub mod entities;
pub mod error;
pub mod image;
pub mod matches;
pub mod store;
pub mod traits;
pub mod version;

pub mod prelude {
    pub use super::collection::*;
    pub use super::entities::*;
    pub use super::error::*;
    pub use super::image::*;
    pub use super::matches::*;
    pub use super::store::*;
    pub use super::traits::*;
    pub use super::version::*;
}
