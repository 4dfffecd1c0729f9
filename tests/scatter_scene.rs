use scr_rs::models::Record;
use scr_rs::scatter::Scene;

fn rec(year: i32, rank: u32, country: &str, documents: u64, citations: u64, h: u64) -> Record {
    Record {
        year: Some(year),
        rank: Some(rank),
        region: "EU".into(),
        country: country.into(),
        documents: Some(documents),
        citations: Some(citations),
        h_index: Some(h),
    }
}

// The three-record scenario: the scatter must use only the 2021 row.
fn sample() -> Vec<Record> {
    vec![
        rec(2020, 1, "A", 100, 50, 10),
        rec(2020, 2, "B", 80, 40, 8),
        rec(2021, 1, "C", 120, 60, 12),
    ]
}

#[test]
fn only_the_latest_year_participates() {
    let scene = Scene::build(&sample()).unwrap();
    assert_eq!(scene.year, 2021);
    assert_eq!(scene.points.len(), 1);
    assert_eq!(scene.points[0].country, "C");
    assert_eq!(scene.avg_documents, 120.0);
    assert_eq!(scene.avg_citations, 60.0);
}

#[test]
fn single_point_radius_falls_back_to_the_range_midpoint() {
    let scene = Scene::build(&sample()).unwrap();
    assert_eq!(scene.points[0].radius, 12.5);
}

#[test]
fn radius_spans_five_to_twenty_pixels() {
    let data = vec![
        rec(2021, 1, "A", 100, 100, 5),
        rec(2021, 2, "B", 100, 100, 30),
        rec(2021, 3, "C", 100, 100, 55),
    ];
    let scene = Scene::build(&data).unwrap();
    assert_eq!(scene.points[0].radius, 5.0);
    assert_eq!(scene.points[1].radius, 12.5);
    assert_eq!(scene.points[2].radius, 20.0);
}

#[test]
fn color_ramps_from_red_to_green_by_rank() {
    let data = vec![
        rec(2021, 1, "A", 100, 100, 10),
        rec(2021, 2, "B", 100, 100, 10),
        rec(2021, 3, "C", 100, 100, 10),
    ];
    let scene = Scene::build(&data).unwrap();
    assert_eq!(scene.points[0].color, (255, 0, 0));
    assert_eq!(scene.points[2].color, (0, 128, 0));
}

#[test]
fn positions_use_log_scales_with_the_max_at_the_far_edge() {
    let data = vec![
        rec(2021, 1, "A", 1000, 100, 10),
        rec(2021, 2, "B", 10, 10, 10),
    ];
    let scene = Scene::build(&data).unwrap();
    assert!((scene.points[0].x - 1.0).abs() < 1e-12);
    assert!((scene.points[0].y - 1.0).abs() < 1e-12);
    // 10 on a [1, 1000] log axis sits a third of the way along
    assert!((scene.points[1].x - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn zero_counts_clamp_to_the_axis_edge() {
    let data = vec![
        rec(2021, 1, "A", 100, 100, 10),
        rec(2021, 2, "B", 0, 100, 10),
    ];
    let scene = Scene::build(&data).unwrap();
    assert_eq!(scene.points[1].x, 0.0);
}

#[test]
fn rows_missing_a_metric_are_skipped_but_still_widen_the_rank_ramp() {
    let data = vec![
        rec(2021, 1, "A", 100, 100, 10),
        Record {
            h_index: None,
            ..rec(2021, 2, "B", 100, 100, 10)
        },
        rec(2021, 3, "C", 100, 100, 10),
    ];
    let scene = Scene::build(&data).unwrap();
    let countries: Vec<&str> = scene.points.iter().map(|p| p.country.as_str()).collect();
    assert_eq!(countries, vec!["A", "C"]);
    // rank 3 still maps to the far end of a [1, 3] ramp
    assert_eq!(scene.points[1].color, (0, 128, 0));
}

#[test]
fn averages_ignore_only_the_missing_values() {
    let data = vec![
        rec(2021, 1, "A", 100, 60, 10),
        Record {
            documents: None,
            ..rec(2021, 2, "B", 0, 30, 10)
        },
    ];
    let scene = Scene::build(&data).unwrap();
    assert_eq!(scene.avg_documents, 100.0);
    assert_eq!(scene.avg_citations, 45.0);
}

#[test]
fn no_records_is_an_explicit_error() {
    let err = Scene::build(&[]).unwrap_err();
    assert!(err.to_string().contains("no data to plot"));
}

#[test]
fn latest_year_without_numeric_values_is_an_explicit_error() {
    let data = vec![Record {
        documents: None,
        citations: None,
        h_index: None,
        ..rec(2021, 1, "A", 0, 0, 0)
    }];
    let err = Scene::build(&data).unwrap_err();
    assert!(err.to_string().contains("no numeric values to plot"));
}

#[test]
fn decade_ticks_cover_the_domain() {
    let data = vec![
        rec(2021, 1, "A", 1500, 120, 10),
        rec(2021, 2, "B", 10, 10, 10),
    ];
    let scene = Scene::build(&data).unwrap();
    let xs: Vec<f64> = scene.x_ticks.iter().map(|(_, v)| *v).collect();
    let ys: Vec<f64> = scene.y_ticks.iter().map(|(_, v)| *v).collect();
    assert_eq!(xs, vec![1.0, 10.0, 100.0, 1000.0]);
    assert_eq!(ys, vec![1.0, 10.0, 100.0]);
}
