use scr_rs::filter::filter;
use scr_rs::models::{REGION_WILDCARD, Record, Selection};

fn rec(year: i32, rank: u32, region: &str, country: &str) -> Record {
    Record {
        year: Some(year),
        rank: Some(rank),
        region: region.into(),
        country: country.into(),
        documents: Some(100),
        citations: Some(50),
        h_index: Some(10),
    }
}

// The three-record scenario: A and B in 2020, C in 2021, all rank-sorted
// within their year.
fn sample() -> Vec<Record> {
    vec![
        rec(2020, 1, "EU", "A"),
        rec(2020, 2, "EU", "B"),
        rec(2021, 1, "EU", "C"),
    ]
}

fn countries(rows: &[&Record]) -> Vec<String> {
    rows.iter().map(|r| r.country.clone()).collect()
}

#[test]
fn top_of_selected_year_keeps_feed_order() {
    let data = sample();
    let sel = Selection {
        size: 5,
        year: Some(2020),
        region: Some(REGION_WILDCARD.to_string()),
        flop: false,
    };
    assert_eq!(countries(&filter(&data, &sel)), vec!["A", "B"]);
}

#[test]
fn single_row_flop_is_a_noop() {
    let data = sample();
    let sel = Selection {
        size: 1,
        year: Some(2020),
        region: Some(REGION_WILDCARD.to_string()),
        flop: true,
    };
    assert_eq!(countries(&filter(&data, &sel)), vec!["A"]);
}

#[test]
fn unset_year_matches_all_years() {
    let data = sample();
    let sel = Selection {
        size: 5,
        year: None,
        region: Some("EU".to_string()),
        flop: false,
    };
    assert_eq!(countries(&filter(&data, &sel)), vec!["A", "B", "C"]);
}

#[test]
fn flop_output_is_the_reverse_of_the_unflopped_output() {
    let data = vec![
        rec(2020, 1, "EU", "A"),
        rec(2020, 2, "AS", "B"),
        rec(2020, 3, "EU", "C"),
        rec(2021, 1, "EU", "D"),
        rec(2021, 2, "AS", "E"),
    ];
    for region in [None, Some("EU".to_string())] {
        let plain = Selection {
            size: 10,
            year: None,
            region: region.clone(),
            flop: false,
        };
        let flopped = Selection {
            flop: true,
            ..plain.clone()
        };
        let mut expected = filter(&data, &plain);
        expected.reverse();
        assert_eq!(filter(&data, &flopped), expected);
    }
}

#[test]
fn output_is_an_ordered_subsequence_of_the_input() {
    let data = vec![
        rec(2020, 3, "EU", "A"),
        rec(2020, 1, "AS", "B"),
        rec(2021, 2, "EU", "C"),
        rec(2021, 1, "AS", "D"),
    ];
    let sel = Selection {
        size: 20,
        year: None,
        region: None,
        flop: false,
    };
    let out = filter(&data, &sel);
    let positions: Vec<usize> = out
        .iter()
        .map(|r| data.iter().position(|d| std::ptr::eq(d, *r)).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(positions, sorted, "no reordering, no duplication");
}

#[test]
fn enlarging_size_only_adds_records() {
    let data = vec![
        rec(2020, 1, "EU", "A"),
        rec(2020, 2, "EU", "B"),
        rec(2020, 7, "EU", "C"),
        rec(2020, 15, "EU", "D"),
    ];
    let mut previous: Vec<String> = Vec::new();
    for size in [3u32, 5, 10, 20] {
        let sel = Selection {
            size,
            year: None,
            region: None,
            flop: false,
        };
        let current = countries(&filter(&data, &sel));
        for c in &previous {
            assert!(current.contains(c), "size {size} lost {c}");
        }
        previous = current;
    }
}

#[test]
fn missing_rank_never_satisfies_a_size_bound() {
    let mut data = sample();
    data.push(Record {
        rank: None,
        ..rec(2020, 1, "EU", "X")
    });
    let sel = Selection {
        size: 20,
        year: None,
        region: None,
        flop: false,
    };
    assert!(!countries(&filter(&data, &sel)).contains(&"X".to_string()));
}

#[test]
fn missing_year_only_matches_the_unset_year_selection() {
    let mut data = sample();
    data.push(Record {
        year: None,
        ..rec(2020, 1, "EU", "X")
    });
    let picked = Selection {
        size: 20,
        year: Some(2020),
        region: None,
        flop: false,
    };
    assert!(!countries(&filter(&data, &picked)).contains(&"X".to_string()));

    let unset = Selection { year: None, ..picked };
    assert!(countries(&filter(&data, &unset)).contains(&"X".to_string()));
}

#[test]
fn region_filter_matches_exactly() {
    let data = vec![
        rec(2020, 1, "Western Europe", "A"),
        rec(2020, 2, "Eastern Europe", "B"),
    ];
    let sel = Selection {
        size: 5,
        year: None,
        region: Some("Western Europe".to_string()),
        flop: false,
    };
    assert_eq!(countries(&filter(&data, &sel)), vec!["A"]);
}

#[test]
fn empty_result_is_a_valid_state() {
    let data = sample();
    let sel = Selection {
        size: 5,
        year: Some(1999),
        region: None,
        flop: false,
    };
    assert!(filter(&data, &sel).is_empty());
}
