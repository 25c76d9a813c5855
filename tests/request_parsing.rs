use period_bars::format::NumberStyle;
use period_bars::layout::Orientation;
use period_bars::models::{
    DatasetKind, DatasetPayload, NewUserData, RevenueByCategoryData, RevenueSharesData,
};
use period_bars::request::ChartRequest;
use period_bars::viz::LegendPosition;

const SHARES_BODY: &str = r#"{
    "chart_data": {
        "labels": ["Mobile", "Web", "Store"],
        "last_month": { "revenue": [2500000, 1000000, 500000], "share": [62.5, 25, 12.5] },
        "prev_month": { "revenue": [1200000, 1800000, 0], "share": [40, 60, 0] }
    },
    "last_month_str": "05/2024",
    "prev_month_str": "04/2024"
}"#;

const COUNTS_BODY: &str = r#"{
    "chart_data": {
        "labels": ["A", "B"],
        "new_user_last_month": [120, 45],
        "new_user_prev_month": [98, 60]
    },
    "last_month_str": "T5",
    "prev_month_str": "T4"
}"#;

#[test]
fn shares_request_maps_to_a_vertical_annotated_preset() {
    let req: ChartRequest<RevenueSharesData> = serde_json::from_str(SHARES_BODY).unwrap();
    assert_eq!(req.chart_data.last_month.share, vec![62.5, 25.0, 12.5]);

    let (payload, config) = req.into_parts();
    assert_eq!(payload.kind(), DatasetKind::RevenueWithShares);
    assert_eq!(config.orientation, Orientation::Vertical);
    assert!(config.annotate_shares);
    assert_eq!(config.legend_position, LegendPosition::UpperRight);
    assert_eq!((config.width, config.height, config.dpi), (10.0, 8.0, 100));
    assert_eq!(config.pixel_size(), (1000, 800));
    assert_eq!(
        config.title(),
        "Doanh thu công ty tháng 05/2024 và tháng 04/2024"
    );
}

#[test]
fn counts_request_uses_grouped_numbers_and_shorter_figure() {
    let req: ChartRequest<NewUserData> = serde_json::from_str(COUNTS_BODY).unwrap();
    let (payload, config) = req.into_parts();
    assert_eq!(payload.kind(), DatasetKind::CountsByCategory);
    assert_eq!(config.number_style, NumberStyle::PlainGrouped);
    assert_eq!(config.orientation, Orientation::Horizontal);
    assert_eq!(config.height, 7.0);
    assert_eq!(config.legend_position, LegendPosition::LowerRight);
    assert_eq!(config.series_label("T5"), "Lượt đăng ký mới T5");
}

#[test]
fn overrides_replace_preset_values() {
    let body = r#"{
        "chart_data": {
            "labels": ["A"],
            "last_month_revenue": [1.5e9],
            "prev_month_revenue": [1.2e9]
        },
        "last_month_str": "05/2024",
        "prev_month_str": "04/2024",
        "width": 6,
        "dpi": 150,
        "orientation": "vertical"
    }"#;
    let req: ChartRequest<RevenueByCategoryData> = serde_json::from_str(body).unwrap();
    let (_, config) = req.into_parts();
    assert_eq!(config.orientation, Orientation::Vertical);
    assert_eq!(config.width, 6.0);
    assert_eq!(config.height, 8.0);
    assert_eq!(config.pixel_size(), (900, 1200));
    assert_eq!(config.number_style, NumberStyle::AbbreviatedCurrency);
}

#[test]
fn wrong_shape_is_rejected() {
    let res: Result<ChartRequest<RevenueByCategoryData>, _> = serde_json::from_str(COUNTS_BODY);
    assert!(res.is_err());
}

#[test]
fn counts_become_float_series() {
    let req: ChartRequest<NewUserData> = serde_json::from_str(COUNTS_BODY).unwrap();
    let payload: DatasetPayload = req.chart_data.into();
    let view = payload.to_view();
    assert_eq!(view.labels, vec!["A", "B"]);
    assert_eq!(view.series["current"].values, vec![120.0, 45.0]);
    assert_eq!(view.series["prior"].values, vec![98.0, 60.0]);
}

#[test]
fn render_request_produces_png() {
    let req: ChartRequest<NewUserData> = serde_json::from_str(COUNTS_BODY).unwrap();
    let req = ChartRequest {
        dpi: Some(40),
        ..req
    };
    let png = period_bars::render_request(req).unwrap();
    assert_eq!((png.width(), png.height()), (400, 280));
}
