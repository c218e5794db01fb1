use super::*;
use crate::doc::ItemId;

fn item(id: ItemId, shape: ShapeKind) -> CanvasItem {
    CanvasItem { id, shape, x: 0.0, y: 0.0, size: 80.0 }
}

#[test]
fn empty_list_counts_zero_for_every_kind() {
    let counts = ShapeCounts::tally(&[]);
    for kind in ShapeKind::ALL {
        assert_eq!(counts.get(kind), 0);
    }
    assert_eq!(counts.total(), 0);
}

#[test]
fn tally_matches_filter_count() {
    let items = vec![
        item(1, ShapeKind::Circle),
        item(2, ShapeKind::Triangle),
        item(3, ShapeKind::Circle),
        item(4, ShapeKind::Circle),
        item(5, ShapeKind::Triangle),
    ];
    let counts = ShapeCounts::tally(&items);
    for kind in ShapeKind::ALL {
        let expected = items.iter().filter(|i| i.shape == kind).count();
        assert_eq!(counts.get(kind), expected);
    }
    assert_eq!(counts.total(), items.len());
}

#[test]
fn entries_in_palette_order_with_zero_rows() {
    let counts = ShapeCounts::tally(&[item(1, ShapeKind::Square)]);
    let rows: Vec<(ShapeKind, usize)> = counts.entries().iter().map(|(k, _, n)| (*k, *n)).collect();
    assert_eq!(rows, vec![(ShapeKind::Circle, 0), (ShapeKind::Square, 1), (ShapeKind::Triangle, 0)]);
}

#[test]
fn entries_use_summary_icon_size() {
    for (_, icon, _) in ShapeCounts::default().entries() {
        assert_eq!(icon.extent(), (SUMMARY_ICON_SIZE, SUMMARY_ICON_SIZE));
    }
}
