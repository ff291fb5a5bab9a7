//! Field box normalization.

use dftk_model::{FieldAttributes, Rect, bounding_box, normalize_boxes};
use proptest::prelude::*;

#[test]
fn uneven_run_is_evenly_respaced() {
    let raw = [
        Rect::new(100, 40, 12, 20),
        Rect::new(111, 40, 18, 20),
        Rect::new(130, 40, 10, 20),
    ];
    let boxes = normalize_boxes(&raw);
    assert_eq!(
        boxes,
        vec![
            Rect::new(100, 40, 13, 20),
            Rect::new(113, 40, 13, 20),
            Rect::new(126, 40, 14, 20),
        ]
    );
    assert_eq!(bounding_box(&boxes), Some(Rect::new(100, 40, 40, 20)));
}

#[test]
fn split_gives_remainder_to_last_box() {
    let parts = Rect::new(20, 5, 10, 8).split_horizontal(3);
    let widths: Vec<i32> = parts.iter().map(|r| r.width).collect();
    let lefts: Vec<i32> = parts.iter().map(|r| r.left).collect();
    assert_eq!(widths, [3, 3, 4]);
    assert_eq!(lefts, [20, 23, 26]);
}

#[test]
fn even_adjacent_pair_survives_normalization() {
    let raw = [Rect::new(0, 0, 5, 5), Rect::new(5, 0, 5, 5)];
    assert_eq!(normalize_boxes(&raw), raw);
}

#[test]
fn set_rects_normalizes_and_bounds() {
    let mut attrs = FieldAttributes::default();
    assert_eq!(attrs.bounding_box(), None);
    attrs.set_rects(&[Rect::new(0, 0, 3, 5), Rect::new(3, 0, 7, 5)]);
    assert_eq!(attrs.rects, &[Rect::new(0, 0, 5, 5), Rect::new(5, 0, 5, 5)]);
    let bbox = attrs.bounding_box().expect("bbox");
    assert_eq!(bbox.top_left(), (0, 0));
    assert_eq!(bbox.bottom_right(), (10, 5));
    assert_eq!(bbox.to_string(), "(0,0,10,5)");
}

/// One row of horizontally adjacent boxes with positive widths.
fn row() -> impl Strategy<Value = Vec<Rect>> {
    (0i32..400, 0i32..400, 1i32..40, prop::collection::vec(1i32..30, 1..8)).prop_map(
        |(left, top, height, widths)| {
            let mut x = left;
            widths
                .into_iter()
                .map(|width| {
                    let rect = Rect::new(x, top, width, height);
                    x += width;
                    rect
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn split_widths_sum_to_original(
        left in -100i32..100,
        width in 0i32..1000,
        n in 1usize..50,
    ) {
        let rect = Rect::new(left, 7, width, 9);
        let parts = rect.split_horizontal(n);
        prop_assert_eq!(parts.len(), n);
        prop_assert_eq!(parts.iter().map(|r| r.width).sum::<i32>(), width);
        prop_assert_eq!(parts[0].left, left);
        prop_assert_eq!(parts[n - 1].right(), rect.right());
    }

    #[test]
    fn normalizing_a_row_keeps_count_and_span(raw in row()) {
        let boxes = normalize_boxes(&raw);
        prop_assert_eq!(boxes.len(), raw.len());
        prop_assert_eq!(bounding_box(&boxes), bounding_box(&raw));
    }

    #[test]
    fn normalizing_is_idempotent(rows in prop::collection::vec(row(), 1..4)) {
        // Keep rows apart so separate runs never touch.
        let raw: Vec<Rect> = rows
            .into_iter()
            .enumerate()
            .flat_map(|(idx, row)| {
                let shift = i32::try_from(idx).unwrap() * 1000;
                row.into_iter().map(move |r| Rect::new(r.left, r.top + shift, r.width, r.height))
            })
            .collect();
        let once = normalize_boxes(&raw);
        prop_assert_eq!(normalize_boxes(&once), once);
    }
}
