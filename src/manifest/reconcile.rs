use std::collections::{HashMap, HashSet};

use super::Manifest;
use crate::packing::SpriteDescriptor;

/// Anything that carries a sprite key
pub trait Keyed {
    fn key(&self) -> &str;
}

impl<P> Keyed for SpriteDescriptor<P> {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Sprites in manifest order, plus what changed since the manifest was written
#[derive(Debug)]
pub struct Reconciled<T> {
    pub sprites: Vec<T>,
    /// Keys not present in the manifest, in the order they were appended
    pub added: Vec<String>,
    /// Manifest keys with no matching sprite in this run
    pub removed: Vec<String>,
}

/// Order sprites so previously seen keys keep their relative order.
///
/// Without a manifest every sprite is sorted by key. With one, known keys
/// follow the manifest and unknown keys are appended sorted by key. Manifest
/// keys that no longer exist are dropped and reported in `removed`.
pub fn reorder_from_manifest<T: Keyed>(
    sprites: Vec<T>,
    manifest: Option<&Manifest>,
) -> Reconciled<T> {
    let Some(manifest) = manifest else {
        let mut sprites = sprites;
        sprites.sort_by(|a, b| a.key().cmp(b.key()));
        return Reconciled {
            sprites,
            added: Vec::new(),
            removed: Vec::new(),
        };
    };

    let mut rank: HashMap<&str, usize> = HashMap::with_capacity(manifest.sprite_order.len());
    for (index, key) in manifest.sprite_order.iter().enumerate() {
        // First occurrence wins if a hand-edited manifest repeats a key
        rank.entry(key.as_str()).or_insert(index);
    }

    let (mut known, mut fresh): (Vec<T>, Vec<T>) = sprites
        .into_iter()
        .partition(|s| rank.contains_key(s.key()));

    known.sort_by_key(|s| rank.get(s.key()).copied().unwrap_or(usize::MAX));
    fresh.sort_by(|a, b| a.key().cmp(b.key()));

    let present: HashSet<&str> = known.iter().map(Keyed::key).collect();
    let removed = manifest
        .sprite_order
        .iter()
        .filter(|key| !present.contains(key.as_str()))
        .cloned()
        .collect();
    let added = fresh.iter().map(|s| s.key().to_string()).collect();

    known.append(&mut fresh);

    Reconciled {
        sprites: known,
        added,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(order: &[&str]) -> Manifest {
        Manifest::from_order(order.iter().map(|s| s.to_string()).collect(), None)
    }

    fn sprites(keys: &[&str]) -> Vec<SpriteDescriptor<()>> {
        keys.iter().map(|k| SpriteDescriptor::sized(*k, 8, 8)).collect()
    }

    fn order<T: Keyed>(reconciled: &Reconciled<T>) -> Vec<&str> {
        reconciled.sprites.iter().map(Keyed::key).collect()
    }

    #[test]
    fn test_first_run_sorts_by_key() {
        let result = reorder_from_manifest(sprites(&["walk", "attack", "idle"]), None);

        assert_eq!(order(&result), vec!["attack", "idle", "walk"]);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_new_sprite_appended() {
        let m = manifest(&["a", "b", "c"]);
        let result = reorder_from_manifest(sprites(&["d", "c", "a", "b"]), Some(&m));

        assert_eq!(order(&result), vec!["a", "b", "c", "d"]);
        assert_eq!(result.added, vec!["d"]);
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_removed_sprite_dropped() {
        let m = manifest(&["a", "b", "c"]);
        let result = reorder_from_manifest(sprites(&["c", "a"]), Some(&m));

        assert_eq!(order(&result), vec!["a", "c"]);
        assert_eq!(result.removed, vec!["b"]);
        assert!(result.added.is_empty());
    }

    #[test]
    fn test_manifest_order_beats_key_order() {
        let m = manifest(&["zebra", "apple"]);
        let input = sprites(&["apple", "mango", "zebra", "banana"]);
        let result = reorder_from_manifest(input, Some(&m));

        assert_eq!(order(&result), vec!["zebra", "apple", "banana", "mango"]);
        assert_eq!(result.added, vec!["banana", "mango"]);
    }

    #[test]
    fn test_repeated_manifest_key_uses_first_position() {
        let m = manifest(&["b", "a", "b"]);
        let result = reorder_from_manifest(sprites(&["a", "b"]), Some(&m));

        assert_eq!(order(&result), vec!["b", "a"]);
        assert!(result.removed.is_empty());
    }
}
