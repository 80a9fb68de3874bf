mod loader;
mod resizer;
mod sprite;
mod trimmer;

pub use loader::{LoadOptions, discover_images, load_sprites};
pub use resizer::{ResizeOptions, resize_sprite};
pub use sprite::{PackedSprite, SourceSprite, TrimInfo};
pub use trimmer::trim_sprite;
