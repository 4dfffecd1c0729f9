use scr_rs::feed::parse_csv;

const SAMPLE: &str = "\
Year,Rank,Region,Country,Documents,Citations,H index
2020,1,Western Europe,France,100,50,10
2020,n/a,Western Europe,Germany,abc,40,8
 2021 ,1,Asiatic Region,Japan,120,60,12
";

#[test]
fn parse_sample_feed() {
    let records = parse_csv(SAMPLE.as_bytes()).unwrap();
    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first.year, Some(2020));
    assert_eq!(first.rank, Some(1));
    assert_eq!(first.region, "Western Europe");
    assert_eq!(first.country, "France");
    assert_eq!(first.documents, Some(100));
    assert_eq!(first.citations, Some(50));
    assert_eq!(first.h_index, Some(10));
}

#[test]
fn non_numeric_fields_become_none_not_zero() {
    let records = parse_csv(SAMPLE.as_bytes()).unwrap();
    let germany = &records[1];
    assert_eq!(germany.rank, None);
    assert_eq!(germany.documents, None);
    // siblings are unaffected
    assert_eq!(germany.citations, Some(40));
    assert_eq!(germany.country, "Germany");
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let records = parse_csv(SAMPLE.as_bytes()).unwrap();
    assert_eq!(records[2].year, Some(2021));
}

#[test]
fn row_order_is_preserved() {
    let records = parse_csv(SAMPLE.as_bytes()).unwrap();
    let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(countries, vec!["France", "Germany", "Japan"]);
}

#[test]
fn renamed_header_fails_the_parse() {
    // `H index` carries a space; anything else must not silently map.
    let bad = "\
Year,Rank,Region,Country,Documents,Citations,H_index
2020,1,EU,France,100,50,10
";
    assert!(parse_csv(bad.as_bytes()).is_err());
}

#[test]
fn empty_body_yields_no_records() {
    let header_only = "Year,Rank,Region,Country,Documents,Citations,H index\n";
    assert!(parse_csv(header_only.as_bytes()).unwrap().is_empty());
}
