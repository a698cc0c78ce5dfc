mod collision;
mod items;

pub use collision::{CollisionGrid, DYNAMIC_BODY, FREE, STATIC_BODY};
pub use items::{GridItem, GridItems};
