//! Entity registry and the payloads its entities own

pub mod body;
pub mod payload;
pub mod registry;

pub use body::BodyBuffer;
pub use payload::{ActorData, EnemyData, Payload, PickupData};
pub use registry::{Entity, EntityRegistry};
