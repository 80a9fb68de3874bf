mod reconcile;
mod store;
mod types;

pub use reconcile::{Keyed, Reconciled, reorder_from_manifest};
pub use store::manifest_path;
pub use types::{MANIFEST_VERSION, Manifest, ManifestMetadata};
