// Domain entities
pub mod alliance;
pub mod model;
pub mod player;
pub mod snapshot;

pub use alliance::*;
pub use model::*;
pub use player::*;
pub use snapshot::*;
