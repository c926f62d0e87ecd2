use super::*;

fn assert_well_formed(plan: &PartitionPlan, first_row: usize, rows: usize, parts: usize) {
    assert_eq!(plan.len(), parts.min(rows), "rows={rows} parts={parts}");
    let mut next = first_row;
    for r in plan.ranges() {
        assert!(!r.is_empty(), "empty range in rows={rows} parts={parts}");
        assert_eq!(r.start, next, "gap or overlap in rows={rows} parts={parts}");
        next = r.end;
    }
    assert_eq!(next, first_row + rows);
    let sum: usize = plan.ranges().iter().map(|r| r.len()).sum();
    assert_eq!(sum, rows);
}

#[test]
fn plans_cover_rows_exactly_once_for_many_shapes() {
    for rows in 0..40 {
        for parts in 1..50 {
            let plan = PartitionPlan::new(1, rows, parts).unwrap();
            assert_well_formed(&plan, 1, rows, parts);
        }
    }
}

#[test]
fn remainder_goes_to_leading_ranges() {
    let plan = PartitionPlan::new(1, 10, 4).unwrap();
    let lens: Vec<_> = plan.ranges().iter().map(|r| r.len()).collect();
    assert_eq!(lens, vec![3, 3, 2, 2]);
    assert_eq!(plan.base_rows(), 2);
    assert_eq!(plan.extra_rows(), 2);
    assert_eq!(plan.ranges()[0], RowRange::new(1, 4));
    assert_eq!(plan.ranges()[3], RowRange::new(9, 11));
}

#[test]
fn parts_are_clamped_to_row_count() {
    let plan = PartitionPlan::new(1, 3, 8).unwrap();
    assert_eq!(plan.len(), 3);
    assert!(plan.ranges().iter().all(|r| r.len() == 1));
}

#[test]
fn interior_skips_border_rows() {
    let plan = PartitionPlan::interior(3, 10).unwrap();
    assert_eq!(plan.ranges(), &[RowRange::new(1, 2)]);
    assert_eq!(plan.first_row(), 1);
    assert_eq!(plan.total_rows(), 1);

    assert!(PartitionPlan::interior(2, 4).unwrap().is_empty());
    assert!(PartitionPlan::interior(0, 4).unwrap().is_empty());
}

#[test]
fn zero_parts_is_rejected() {
    assert!(matches!(
        PartitionPlan::new(1, 5, 0),
        Err(EdgeError::Validation(_))
    ));
}

#[test]
fn row_range_helpers() {
    let r = RowRange::new(2, 5);
    assert_eq!(r.len(), 3);
    assert!(r.contains(2) && r.contains(4) && !r.contains(5));
    assert_eq!(r.as_range(), 2..5);
    assert!(RowRange::new(4, 1).is_empty());
}
