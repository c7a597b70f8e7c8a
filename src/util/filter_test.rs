use super::*;

fn stock(ticker: &str, name: Option<&str>) -> Stock {
    serde_json::from_value(serde_json::json!({
        "Ticker": ticker,
        "company_name": name,
        "Close": 10.0
    }))
    .unwrap()
}

fn txn(total: f64, change: f64, date: &str) -> Transaction {
    serde_json::from_value(serde_json::json!({
        "symbol": "AAPL",
        "totalPrice": total,
        "percentChange": change,
        "date": date
    }))
    .unwrap()
}

fn now() -> NaiveDateTime {
    parse_transaction_date("2024-06-15 12:00:00").unwrap()
}

fn totals(list: &[Transaction]) -> Vec<f64> {
    list.iter().map(|t| t.total_price).collect()
}

// =============================================================
// Stock / report search
// =============================================================

#[test]
fn filter_stocks_matches_ticker_or_company_case_insensitively() {
    let stocks = vec![stock("AAPL", Some("Apple Inc.")), stock("MSFT", Some("Microsoft")), stock("PLTR", None)];
    let tickers = |list: Vec<Stock>| list.into_iter().map(|s| s.ticker).collect::<Vec<_>>();

    assert_eq!(tickers(filter_stocks(&stocks, "aPp")), vec!["AAPL"]);
    assert_eq!(tickers(filter_stocks(&stocks, "soft")), vec!["MSFT"]);
    assert_eq!(tickers(filter_stocks(&stocks, "pl")), vec!["AAPL", "PLTR"]);
    assert_eq!(tickers(filter_stocks(&stocks, "")), vec!["AAPL", "MSFT", "PLTR"]);
    assert!(filter_stocks(&stocks, "zzz").is_empty());
}

#[test]
fn filter_stocks_does_not_trim_the_query() {
    let stocks = vec![stock("AAPL", Some("Apple Inc.")), stock("MSFT", Some("Microsoft"))];
    let tickers = |list: Vec<Stock>| list.into_iter().map(|s| s.ticker).collect::<Vec<_>>();

    assert!(filter_stocks(&stocks, " aapl").is_empty());
    assert!(filter_stocks(&stocks, "   ").is_empty());
    assert_eq!(tickers(filter_stocks(&stocks, "e i")), vec!["AAPL"]);
}

#[test]
fn filter_stocks_is_idempotent() {
    let stocks = vec![stock("AAPL", Some("Apple Inc.")), stock("AMZN", Some("Amazon")), stock("MSFT", None)];
    let once = filter_stocks(&stocks, "a");
    let twice = filter_stocks(&once, "a");
    assert_eq!(once, twice);
}

#[test]
fn filter_reports_searches_name_and_summary() {
    let reports = vec![
        ReportSummary { id: "1".to_owned(), name: "Report - AAPL".to_owned(), summary: "Strong quarter".to_owned() },
        ReportSummary { id: "2".to_owned(), name: "Report - TSLA".to_owned(), summary: "Volatile".to_owned() },
    ];
    assert_eq!(filter_reports(&reports, "tsla").len(), 1);
    assert_eq!(filter_reports(&reports, "QUARTER")[0].id, "1");
    assert_eq!(filter_reports(&reports, "").len(), 2);
}

// =============================================================
// Transactions
// =============================================================

#[test]
fn price_bounds_are_inclusive() {
    let list = vec![
        txn(100.0, 1.0, "2024-06-01 00:00:00"),
        txn(150.0, 1.0, "2024-06-01 00:00:00"),
        txn(200.0, 1.0, "2024-06-01 00:00:00"),
    ];
    let filters = TransactionFilters { min_price: "100".to_owned(), max_price: "150".to_owned(), ..Default::default() };
    assert_eq!(totals(&filter_transactions(&list, &filters, now())), vec![100.0, 150.0]);
}

#[test]
fn invalid_price_bounds_are_ignored() {
    let list = vec![txn(5.0, 1.0, ""), txn(500.0, 1.0, "")];
    let filters = TransactionFilters { min_price: "abc".to_owned(), max_price: " ".to_owned(), ..Default::default() };
    assert_eq!(filter_transactions(&list, &filters, now()).len(), 2);
}

#[test]
fn direction_filters_by_sign_of_change() {
    let list = vec![txn(1.0, 2.5, ""), txn(2.0, -0.1, ""), txn(3.0, 0.0, "")];

    let up = TransactionFilters { direction: Some(Direction::Increase), ..Default::default() };
    assert_eq!(totals(&filter_transactions(&list, &up, now())), vec![1.0]);

    let down = TransactionFilters { direction: Some(Direction::Decrease), ..Default::default() };
    assert_eq!(totals(&filter_transactions(&list, &down, now())), vec![2.0]);

    let any = TransactionFilters::default();
    assert_eq!(filter_transactions(&list, &any, now()).len(), 3);
}

#[test]
fn date_range_keeps_recent_transactions() {
    let list = vec![
        txn(1.0, 1.0, "2024-06-10 09:00:00"),
        txn(2.0, 1.0, "2024-05-20 09:00:00"),
        txn(3.0, 1.0, "2023-09-01 09:00:00"),
        txn(4.0, 1.0, "2020-01-01 09:00:00"),
        txn(5.0, 1.0, "not a date"),
    ];
    let with_range = |range| TransactionFilters { date_range: range, ..Default::default() };

    assert_eq!(totals(&filter_transactions(&list, &with_range(DateRange::Week), now())), vec![1.0]);
    assert_eq!(totals(&filter_transactions(&list, &with_range(DateRange::Month), now())), vec![1.0, 2.0]);
    assert_eq!(totals(&filter_transactions(&list, &with_range(DateRange::Year), now())), vec![1.0, 2.0, 3.0]);
    assert_eq!(filter_transactions(&list, &with_range(DateRange::All), now()).len(), 5);
}

#[test]
fn transaction_filter_is_idempotent() {
    let list = vec![txn(10.0, 1.0, "2024-06-14 00:00:00"), txn(20.0, -1.0, "2024-06-14 00:00:00")];
    let filters = TransactionFilters {
        date_range: DateRange::Week,
        min_price: "5".to_owned(),
        max_price: String::new(),
        direction: Some(Direction::Increase),
    };
    let once = filter_transactions(&list, &filters, now());
    assert_eq!(filter_transactions(&once, &filters, now()), once);
}

#[test]
fn query_pairs_use_backend_parameter_names() {
    let filters = TransactionFilters {
        date_range: DateRange::Month,
        min_price: " 10 ".to_owned(),
        max_price: String::new(),
        direction: Some(Direction::Decrease),
    };
    assert_eq!(
        filters.to_query_pairs(),
        vec![
            ("dateRange", "month".to_owned()),
            ("minPrice", "10".to_owned()),
            ("maxPrice", String::new()),
            ("percentChange", "decrease".to_owned()),
        ]
    );
}

#[test]
fn select_values_round_trip() {
    for range in DateRange::ALL {
        assert_eq!(DateRange::parse(range.as_str()), range);
    }
    assert_eq!(DateRange::parse("decade"), DateRange::All);
    assert_eq!(Direction::parse("increase"), Some(Direction::Increase));
    assert_eq!(Direction::parse(""), None);
}

#[test]
fn parse_transaction_date_accepts_date_only() {
    assert_eq!(
        parse_transaction_date("2024-01-02"),
        parse_transaction_date("2024-01-02 00:00:00")
    );
    assert_eq!(parse_transaction_date("02/01/2024"), None);
}
