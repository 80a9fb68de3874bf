use rand::{Rng, SeedableRng};
use sheetpack::PackError;
use sheetpack::packing::{Layout, PackResult, Packer, SpriteDescriptor};

fn random_sprites(seed: u64, count: usize, max_side: u32) -> Vec<SpriteDescriptor<()>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(1..=max_side);
            let h = rng.gen_range(1..=max_side);
            SpriteDescriptor::sized(format!("sprite_{:03}", i), w, h)
        })
        .collect()
}

fn is_pow2(n: u32) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

fn assert_disjoint<P>(result: &PackResult<P>, padding: u32) {
    let boxes: Vec<_> = result.placements.iter().map(|p| p.padded_rect(padding)).collect();
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            assert!(
                !boxes[i].intersects(&boxes[j]),
                "padded boxes overlap: {:?} vs {:?}",
                boxes[i],
                boxes[j]
            );
        }
    }
}

fn assert_rows_contained<P>(result: &PackResult<P>, padding: u32, max_size: u32) {
    for p in &result.placements {
        assert!(p.x >= padding && p.y >= padding);
        assert!(
            p.padded_rect(padding).fits_within(result.width, result.height),
            "{:?} outside {}x{}",
            p.padded_rect(padding),
            result.width,
            result.height
        );
        assert!(p.grid.is_none());
    }
    assert!(is_pow2(result.width) && is_pow2(result.height));
    assert!(result.width <= max_size && result.height <= max_size);
}

#[test]
fn random_rows_no_overlap_and_contained() {
    for seed in 0..20u64 {
        let padding = (seed % 4) as u32;
        let sprites = random_sprites(seed, 80, 64);
        let packer = Packer::new(1024).padding(padding);

        assert!(packer.can_fit(&sprites));
        let result = packer.pack(sprites).expect("pack");

        assert_eq!(result.placements.len(), 80);
        assert_disjoint(&result, padding);
        assert_rows_contained(&result, padding, 1024);
    }
}

#[test]
fn random_rows_by_key_and_as_given() {
    // Neither order is tallest-first, so taller sprites show up mid-row
    for seed in 20..40u64 {
        let padding = (seed % 4) as u32;
        let packers = [
            Packer::new(1024).padding(padding).stable_order(true),
            Packer::new(1024).padding(padding).preserve_input_order(),
        ];

        for packer in packers {
            let result = packer.pack(random_sprites(seed, 80, 64)).expect("pack");

            assert_eq!(result.placements.len(), 80);
            assert_disjoint(&result, padding);
            assert_rows_contained(&result, padding, 1024);
        }
    }
}

#[test]
fn unsorted_rows_overflow_with_capacity_error() {
    for seed in 40..50u64 {
        let sprites = random_sprites(seed, 80, 64);
        let packers = [
            Packer::new(128).padding(2).stable_order(true),
            Packer::new(128).padding(2).preserve_input_order(),
        ];

        for packer in packers {
            let err = packer.pack(sprites.clone()).unwrap_err();
            assert_eq!(err, PackError::CapacityExceeded { max_size: 128 });
        }
    }
}

#[test]
fn random_grid_alignment() {
    for (seed, grid_size) in [(1u64, 8u32), (2, 16), (3, 32), (4, 64), (5, 16), (6, 32)] {
        let padding = (seed % 3) as u32;
        let sprites = random_sprites(seed, 60, 60);
        let packer = Packer::new(2048).padding(padding).grid_size(grid_size);
        assert_eq!(packer.layout, Layout::Grid { grid_size });

        let sizes: Vec<_> = sprites.iter().map(|s| (s.key.clone(), s.width, s.height)).collect();
        let result = packer.pack(sprites).expect("pack");

        assert_disjoint(&result, padding);
        assert!(is_pow2(result.width) && is_pow2(result.height));
        assert_eq!(result.width % grid_size, 0);
        assert_eq!(result.height % grid_size, 0);

        for p in &result.placements {
            let cell = p.grid.expect("grid placement");
            assert!(p.rect().fits_within(result.width, result.height));
            assert_eq!(p.x / grid_size * grid_size, cell.grid_x * grid_size);
            assert_eq!(p.y / grid_size * grid_size, cell.grid_y * grid_size);

            let (_, w, h) = sizes.iter().find(|(k, _, _)| *k == p.key).expect("known key");
            assert_eq!((p.width, p.height), (*w, *h));
            assert_eq!(cell.cells_wide, (w + padding).div_ceil(grid_size));
            assert_eq!(cell.cells_high, (h + padding).div_ceil(grid_size));
        }
    }
}

#[test]
fn packing_is_deterministic() {
    let packer = Packer::new(512).padding(1);
    let a = packer.pack(random_sprites(7, 50, 40)).expect("pack");
    let b = packer.pack(random_sprites(7, 50, 40)).expect("pack");

    let coords = |r: &PackResult<()>| -> Vec<_> {
        r.placements.iter().map(|p| (p.key.clone(), p.x, p.y)).collect()
    };
    assert_eq!(coords(&a), coords(&b));
    assert_eq!((a.width, a.height), (b.width, b.height));
}

#[test]
fn stable_order_ignores_input_order() {
    let packer = Packer::new(512).padding(2).stable_order(true);
    let sprites = random_sprites(11, 30, 48);
    let mut reversed = sprites.clone();
    reversed.reverse();

    let a = packer.pack(sprites).expect("pack");
    let b = packer.pack(reversed).expect("pack");

    let keys: Vec<_> = a.placements.iter().map(|p| p.key.as_str()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(
        a.placements
            .iter()
            .zip(&b.placements)
            .all(|(x, y)| x.key == y.key && x.x == y.x && x.y == y.y)
    );
    assert_disjoint(&a, 2);
    assert_rows_contained(&a, 2, 512);
}

#[test]
fn failed_pack_returns_no_layout() {
    let sprites: Vec<_> = (0..100)
        .map(|i| SpriteDescriptor::sized(format!("s{}", i), 64, 64))
        .collect();
    let packer = Packer::new(128).padding(2);

    assert!(!packer.can_fit(&sprites));
    assert!(packer.pack(sprites).is_err());
}
