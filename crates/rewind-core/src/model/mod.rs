pub mod direction;
pub mod entity;
pub mod event;
pub mod user;

pub use direction::PatchDirection;
pub use entity::{Entity, EntityId};
pub use event::{Event, EventDraft, EventId};
pub use user::{Bag, User};
