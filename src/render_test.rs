use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

#[test]
fn row_cells_are_one_indexed_in_column_order() {
    let row = RowCells::new(3, 4);
    assert_eq!(row.count(), 4);
    let cols: Vec<u32> = row.cells.iter().map(|c| c.col).collect();
    assert_eq!(cols, vec![1, 2, 3, 4]);
    assert!(row.cells.iter().all(|c| c.row == 3));
}

#[test]
fn row_cells_zero_columns_is_empty() {
    assert_eq!(RowCells::new(1, 0).count(), 0);
}

#[test]
fn placeholder_alpha_in_range() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..1000 {
        let a = placeholder_alpha(&mut rng);
        assert!((0.0..PLACEHOLDER_MAX_ALPHA).contains(&a), "alpha {a}");
    }
}

#[test]
fn placeholder_shade_is_black_rgba() {
    let mut rng = SmallRng::seed_from_u64(42);
    let shade = placeholder_shade(&mut rng);
    assert!(shade.starts_with("rgba(0, 0, 0, "));
    assert!(shade.ends_with(')'));
}

#[test]
fn placeholder_shade_is_deterministic_per_seed() {
    let mut a = SmallRng::seed_from_u64(9);
    let mut b = SmallRng::seed_from_u64(9);
    assert_eq!(placeholder_shade(&mut a), placeholder_shade(&mut b));
}
