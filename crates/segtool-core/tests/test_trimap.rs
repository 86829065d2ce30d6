use ndarray::Array2;

use segtool_core::mask::Label;
use segtool_core::trimap::{build_trimap, dilate, erode, StructuringElement};

/// 100x100 all-background seed with a centered 40x40 foreground block.
fn block_seed() -> Array2<bool> {
    let mut seed = Array2::from_elem((100, 100), false);
    for row in 30..70 {
        for col in 30..70 {
            seed[[row, col]] = true;
        }
    }
    seed
}

/// Reference morphology: direct neighborhood scan, no shared code with the
/// element-offset implementation.
fn brute_force(seed: &Array2<bool>, radius: i32, any: bool) -> Array2<bool> {
    let (h, w) = seed.dim();
    let mut out = Array2::from_elem((h, w), false);
    for row in 0..h as i32 {
        for col in 0..w as i32 {
            let mut acc = !any;
            for dr in -radius..=radius {
                for dc in -radius..=radius {
                    if dr * dr + dc * dc > radius * radius {
                        continue;
                    }
                    let (nr, nc) = (row + dr, col + dc);
                    let inside = nr >= 0
                        && nr < h as i32
                        && nc >= 0
                        && nc < w as i32
                        && seed[[nr as usize, nc as usize]];
                    if any {
                        acc |= inside;
                    } else {
                        acc &= inside;
                    }
                }
            }
            out[[row as usize, col as usize]] = acc;
        }
    }
    out
}

#[test]
fn test_disk_element_is_symmetric() {
    let element = StructuringElement::disk(3);
    assert_eq!(element.radius(), 3);

    let mut seed = Array2::from_elem((9, 9), false);
    seed[[4, 4]] = true;
    let dilated = dilate(&seed, &element);

    for row in 0..9 {
        for col in 0..9 {
            assert_eq!(dilated[[row, col]], dilated[[8 - row, 8 - col]]);
            assert_eq!(dilated[[row, col]], dilated[[col, row]]);
        }
    }
}

#[test]
fn test_zero_radius_is_identity() {
    let seed = block_seed();
    let element = StructuringElement::disk(0);
    assert_eq!(dilate(&seed, &element), seed);
    assert_eq!(erode(&seed, &element), seed);
}

#[test]
fn test_morphology_matches_brute_force() {
    let seed = block_seed();
    let element = StructuringElement::disk(15);

    assert_eq!(dilate(&seed, &element), brute_force(&seed, 15, true));
    assert_eq!(erode(&seed, &element), brute_force(&seed, 15, false));
}

#[test]
fn test_trimap_banding_on_block() {
    let seed = block_seed();
    let element = StructuringElement::disk(15);
    let mask = build_trimap(&seed, &element);

    // The disk of radius 15 fits inside the block only on its central
    // 10x10 core.
    for row in 0..100 {
        for col in 0..100 {
            let expected = if (45..55).contains(&row) && (45..55).contains(&col) {
                Label::DefiniteForeground
            } else if (30..70).contains(&row) && (30..70).contains(&col) {
                Label::ProbableForeground
            } else if brute_force(&seed, 15, true)[[row, col]] {
                Label::ProbableBackground
            } else {
                Label::DefiniteBackground
            };
            assert_eq!(mask.data[[row, col]], expected, "at ({row},{col})");
        }
    }
}

#[test]
fn test_trimap_band_samples() {
    let seed = block_seed();
    let element = StructuringElement::disk(15);
    let mask = build_trimap(&seed, &element);

    assert_eq!(mask.data[[50, 50]], Label::DefiniteForeground);
    // Just inside the seed edge: the boundary band.
    assert_eq!(mask.data[[30, 50]], Label::ProbableForeground);
    assert_eq!(mask.data[[44, 50]], Label::ProbableForeground);
    // Just outside the seed edge: the outer band.
    assert_eq!(mask.data[[29, 50]], Label::ProbableBackground);
    assert_eq!(mask.data[[15, 50]], Label::ProbableBackground);
    // Beyond the dilation radius.
    assert_eq!(mask.data[[14, 50]], Label::DefiniteBackground);
    assert_eq!(mask.data[[0, 0]], Label::DefiniteBackground);
}

#[test]
fn test_binary_view_parity() {
    let seed = block_seed();
    let mask = build_trimap(&seed, &StructuringElement::disk(15));
    let binary = mask.binary_view();

    for (idx, label) in mask.data.indexed_iter() {
        assert_eq!(binary[idx], label.code() & 1 == 1);
    }
    // The trimap's foreground is exactly the original seed.
    assert_eq!(binary, seed);
}
