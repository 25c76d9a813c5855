use period_bars::layout::{
    BAR_THICKNESS, LayoutPlanner, Orientation, TextAlign, VALUE_EPSILON,
};
use period_bars::models::{CURRENT_PERIOD, DatasetView, PRIOR_PERIOD, Series};
use proptest::prelude::*;

fn two_period(current: Vec<f64>, prior: Vec<f64>) -> DatasetView {
    let labels: Vec<String> = (0..current.len()).map(|i| format!("c{i}")).collect();
    DatasetView::new(labels)
        .with_series(CURRENT_PERIOD, Series::new(current))
        .with_series(PRIOR_PERIOD, Series::new(prior))
}

#[test]
fn one_rect_per_category_and_series() {
    let data = two_period(vec![3.0, 1.0, 2.0], vec![2.0, 2.0, 2.0]);
    let planner = LayoutPlanner::default();
    let g = planner.plan(3, 2, Orientation::Vertical);
    let bars = planner.place(&g, &data);
    assert_eq!(bars.len(), 6);
    assert!((g.thickness - BAR_THICKNESS).abs() < 1e-12);
    for b in &bars {
        assert!((b.rect.category_to - b.rect.category_from - BAR_THICKNESS).abs() < 1e-12);
        assert_eq!(b.rect.value_from, 0.0);
    }
}

#[test]
fn many_series_shrink_to_fit_the_group() {
    let g = LayoutPlanner::default().plan(2, 4, Orientation::Vertical);
    assert!((g.thickness - 0.175).abs() < 1e-12);
    let first = g.slot(1, 0).unwrap().center - g.thickness / 2.0;
    let last = g.slot(1, 3).unwrap().center + g.thickness / 2.0;
    assert!(first > 0.5 && last < 1.5);
}

#[test]
fn range_leaves_headroom_above_the_tallest_bar() {
    let data = two_period(vec![500.0, 300.0], vec![450.0, 200.0]);
    let r = LayoutPlanner::new(1.3).value_range(&data);
    assert_eq!(r.min, 0.0);
    assert!((r.max - 650.0).abs() < 1e-9);
}

#[test]
fn all_zero_values_get_a_non_degenerate_range() {
    let data = two_period(vec![0.0, 0.0], vec![0.0, 0.0]);
    let r = LayoutPlanner::default().value_range(&data);
    assert_eq!(r.min, 0.0);
    assert_eq!(r.max, VALUE_EPSILON);
    assert!(r.span() > 0.0);
}

#[test]
fn negative_values_extend_below_zero() {
    let data = two_period(vec![-100.0, 50.0], vec![20.0, 10.0]);
    let planner = LayoutPlanner::default();
    let r = planner.value_range(&data);
    assert!((r.min + 120.0).abs() < 1e-9);
    assert!((r.max - 60.0).abs() < 1e-9);

    let g = planner.plan(2, 2, Orientation::Vertical);
    let bars = planner.place(&g, &data);
    let neg = &bars[0];
    assert_eq!(neg.rect.value_from, -100.0);
    assert_eq!(neg.rect.value_to, 0.0);
    assert_eq!(neg.anchor.align, TextAlign::CenterTop);
    assert!(neg.anchor.offset_pt.1 < 0.0);
}

#[test]
fn anchors_sit_past_the_bar_end() {
    let data = two_period(vec![10.0], vec![5.0]);
    let planner = LayoutPlanner::default();

    let v = planner.place(&planner.plan(1, 2, Orientation::Vertical), &data);
    assert_eq!(v[0].anchor.value, 10.0);
    assert_eq!(v[0].anchor.align, TextAlign::CenterBottom);
    assert_eq!(v[0].anchor.offset_pt, (0.0, 4.0));

    let h = planner.place(&planner.plan(1, 2, Orientation::Horizontal), &data);
    assert_eq!(h[0].anchor.align, TextAlign::LeftCenter);
    assert_eq!(h[0].anchor.offset_pt, (3.0, 0.0));
}

#[test]
fn horizontal_reverses_categories_top_down() {
    let planner = LayoutPlanner::default();
    let g = planner.plan(4, 2, Orientation::Horizontal);
    let centers: Vec<f64> = (0..4).map(|i| g.category_position(i)).collect();
    assert_eq!(centers, vec![3.0, 2.0, 1.0, 0.0]);
    assert_eq!(g.category_range(), (-0.5, 3.5));
}

proptest! {
    #[test]
    fn bars_never_overlap(
        n in 1usize..15,
        k in 1usize..6,
        horizontal in any::<bool>(),
    ) {
        let orientation = if horizontal { Orientation::Horizontal } else { Orientation::Vertical };
        let labels: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
        let mut data = DatasetView::new(labels);
        for s in 0..k {
            data = data.with_series(format!("s{s}"), Series::new(vec![1.0; n]));
        }
        let planner = LayoutPlanner::default();
        let g = planner.plan(n, k, orientation);
        let bars = planner.place(&g, &data);
        prop_assert_eq!(bars.len(), n * k);
        for (i, a) in bars.iter().enumerate() {
            for b in &bars[i + 1..] {
                prop_assert!(!a.rect.overlaps(&b.rect));
            }
        }
    }

    #[test]
    fn range_covers_every_value(values in prop::collection::vec(-1.0e9f64..1.0e9, 1..10)) {
        let data = two_period(values.clone(), values.iter().map(|v| v / 2.0).collect());
        let r = LayoutPlanner::default().value_range(&data);
        prop_assert!(r.min <= 0.0 && r.max > 0.0);
        for v in values {
            prop_assert!(v >= r.min && v <= r.max);
        }
    }
}
