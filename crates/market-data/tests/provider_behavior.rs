//! End-to-end behavior of the Alpha Vantage provider against a scripted upstream.

mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use alphavantage_market_data::{
    AlphaVantageProvider, ExchangeRateProvider, HttpReply, MarketDataError, MarketDataProvider,
    SecurityProvider, TransportFailure,
};
use common::{fast_config, provider_with, ScriptedTransport};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const EUR_USD_DAILY: &str = r#"{
    "Meta Data": {"1. Information": "Forex Daily Prices (open, high, low, close)"},
    "Time Series FX (Daily)": {
        "2023-01-03": {"1. open": "1.0600", "4. close": "1.0700"},
        "2023-01-02": {"1. open": "1.0500", "4. close": "1.06"},
        "2023-01-01": {"1. open": "1.0400", "4. close": "1.05"},
        "2022-12-31": {"1. open": "1.0300", "4. close": "1.04"}
    }
}"#;

const ERROR_BODY: &str = r#"{"Error Message": "Invalid API call"}"#;

const IBM_OVERVIEW: &str = r#"{
    "Symbol": "IBM",
    "AssetType": "Common Stock",
    "Name": "International Business Machines",
    "Description": "IBM is an American multinational technology company.",
    "Currency": "USD",
    "Country": "USA"
}"#;

const IBM_DAILY: &str = r#"{
    "Time Series (Daily)": {
        "2024-01-16": {"4. close": "166.0000"},
        "2024-01-12": {"4. close": "165.8000"},
        "2024-01-11": {"4. close": "0"},
        "2024-01-10": {"4. close": "162.2300"}
    }
}"#;

// =============================================================================
// FX rates
// =============================================================================

#[tokio::test]
async fn test_eur_usd_range_returns_in_range_closes() {
    let upstream = ScriptedTransport::bodies(&[EUR_USD_DAILY]);
    let provider = provider_with(&upstream);

    let rates = provider
        .fetch_exchange_rates("EUR", "USD", date(2023, 1, 1), date(2023, 1, 2))
        .await
        .unwrap();

    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0].date, date(2023, 1, 1));
    assert_eq!(rates[0].rate, dec!(1.05));
    assert_eq!(rates[1].date, date(2023, 1, 2));
    assert_eq!(rates[1].rate, dec!(1.06));
    assert!(rates.iter().all(|r| r.from == "EUR" && r.to == "USD"));

    assert_eq!(upstream.functions(), vec!["FX_DAILY"]);
    assert_eq!(upstream.param_values("from_symbol"), vec!["EUR"]);
    assert_eq!(upstream.param_values("to_symbol"), vec!["USD"]);
    assert_eq!(upstream.param_values("outputsize"), vec!["compact"]);
    assert_eq!(upstream.param_values("apikey"), vec!["SECRET123"]);
}

#[tokio::test]
async fn test_single_date_matches_range_filtered_to_that_date() {
    let upstream = ScriptedTransport::bodies(&[EUR_USD_DAILY, EUR_USD_DAILY]);
    let provider = provider_with(&upstream);
    let day = date(2023, 1, 2);

    let single = provider.fetch_exchange_rate("EUR", "USD", day).await.unwrap();
    let range = provider
        .fetch_exchange_rates("EUR", "USD", date(2022, 12, 1), date(2023, 1, 31))
        .await
        .unwrap();

    let filtered: Vec<_> = range.into_iter().filter(|r| r.date == day).collect();
    assert_eq!(filtered, vec![single]);
}

#[tokio::test]
async fn test_single_date_without_row_is_empty_result() {
    let upstream = ScriptedTransport::bodies(&[EUR_USD_DAILY]);
    let provider = provider_with(&upstream);
    let day = date(2023, 1, 7);

    let error = provider.fetch_exchange_rate("EUR", "USD", day).await.unwrap_err();

    assert_eq!(error, MarketDataError::EmptyResult { date: day });
}

#[tokio::test]
async fn test_rate_limit_note_is_no_data_with_the_advisory() {
    let upstream = ScriptedTransport::bodies(&[
        r#"{"Note": "Our standard API call frequency is 5 calls per minute."}"#,
    ]);
    let provider = provider_with(&upstream);

    let error = provider
        .fetch_exchange_rates("EUR", "USD", date(2023, 1, 1), date(2023, 1, 2))
        .await
        .unwrap_err();

    assert_eq!(
        error,
        MarketDataError::NoData {
            message: "Our standard API call frequency is 5 calls per minute.".to_string()
        }
    );
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let upstream = ScriptedTransport::new(vec![
        Err(TransportFailure::Timeout),
        Ok(HttpReply::ok(EUR_USD_DAILY)),
    ]);
    let provider = provider_with(&upstream);

    let rates = provider
        .fetch_exchange_rates("EUR", "USD", date(2023, 1, 1), date(2023, 1, 3))
        .await
        .unwrap();

    assert_eq!(rates.len(), 3);
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn test_http_error_status_is_transport_error() {
    let upstream = ScriptedTransport::new(vec![Ok(HttpReply {
        status: 500,
        body: "Internal Server Error".to_string(),
    })]);
    let provider = provider_with(&upstream);

    let error = provider
        .fetch_latest_exchange_rate("USD", "EUR")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        MarketDataError::Transport {
            status: Some(500),
            ..
        }
    ));
    assert_eq!(upstream.calls(), 1);
}

// =============================================================================
// Error Message handling
// =============================================================================

#[tokio::test]
async fn test_error_message_fails_every_operation_verbatim() {
    let expected = MarketDataError::Provider {
        message: "Invalid API call".to_string(),
    };
    let upstream = ScriptedTransport::bodies(&[ERROR_BODY; 6]);
    let provider = provider_with(&upstream);

    let results = [
        provider
            .fetch_exchange_rates("EUR", "USD", date(2023, 1, 1), date(2023, 1, 2))
            .await
            .map(|_| ()),
        provider
            .fetch_latest_exchange_rate("EUR", "USD")
            .await
            .map(|_| ()),
        provider
            .fetch_security_prices("IBM", None, date(2024, 1, 1), date(2024, 1, 31))
            .await
            .map(|_| ()),
        provider.fetch_security_info("IBM", None).await.map(|_| ()),
        provider.search_securities("IBM").await.map(|_| ()),
        provider
            .fetch_exchange_rate("EUR", "USD", date(2023, 1, 1))
            .await
            .map(|_| ()),
    ];

    for result in results {
        assert_eq!(result, Err(expected.clone()));
    }
    assert_eq!(upstream.calls(), 6);
}

// =============================================================================
// Security metadata and prices
// =============================================================================

#[tokio::test]
async fn test_blank_profile_falls_back_to_exact_search_match() {
    let upstream = ScriptedTransport::bodies(&[
        "{}",
        r#"{"bestMatches": [
            {"1. symbol": "VWRL.AMS", "2. name": "Vanguard FTSE All-World (Amsterdam)",
             "3. type": "ETF", "4. region": "Amsterdam", "8. currency": "EUR"},
            {"1. symbol": "VWRL.LON", "2. name": "Vanguard FTSE All-World UCITS ETF",
             "3. type": "ETF", "4. region": "United Kingdom", "8. currency": "GBX"}
        ]}"#,
    ]);
    let provider = provider_with(&upstream);

    let profile = provider
        .fetch_security_info("VWRL.LON", Some("XLON"))
        .await
        .unwrap();

    assert_eq!(upstream.functions(), vec!["OVERVIEW", "SYMBOL_SEARCH"]);
    assert_eq!(upstream.param_values("keywords"), vec!["VWRL.LON"]);
    assert_eq!(profile.symbol, "VWRL.LON");
    assert_eq!(
        profile.name.as_deref(),
        Some("Vanguard FTSE All-World UCITS ETF")
    );
    assert_eq!(profile.kind.as_deref(), Some("ETF"));
    assert_eq!(profile.description, None);
    assert_eq!(profile.currency, None);
    assert_eq!(profile.exchange_operating_mic.as_deref(), Some("XLON"));
    assert_eq!(profile.links, None);
    assert_eq!(profile.logo_url, None);
}

#[tokio::test]
async fn test_overview_profile_is_used_without_search() {
    let upstream = ScriptedTransport::bodies(&[IBM_OVERVIEW]);
    let provider = provider_with(&upstream);

    let profile = provider.fetch_security_info("IBM", None).await.unwrap();

    assert_eq!(upstream.functions(), vec!["OVERVIEW"]);
    assert_eq!(profile.currency.as_deref(), Some("USD"));
    assert_eq!(profile.kind.as_deref(), Some("Common Stock"));
    assert!(profile.description.is_some());
}

#[tokio::test]
async fn test_unknown_security_is_not_found() {
    let upstream = ScriptedTransport::bodies(&["{}", r#"{"bestMatches": []}"#]);
    let provider = provider_with(&upstream);

    let error = provider.fetch_security_info("NOPE", None).await.unwrap_err();

    assert_eq!(
        error,
        MarketDataError::NotFound {
            symbol: "NOPE".to_string()
        }
    );
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn test_security_prices_use_overview_currency_and_echo_mic() {
    let upstream = ScriptedTransport::bodies(&[IBM_OVERVIEW, IBM_DAILY]);
    let provider = provider_with(&upstream);

    let prices = provider
        .fetch_security_prices("IBM", Some("XNYS"), date(2024, 1, 10), date(2024, 1, 12))
        .await
        .unwrap();

    assert_eq!(upstream.functions(), vec!["OVERVIEW", "TIME_SERIES_DAILY"]);
    // 2024-01-11 has a zero close and is skipped.
    assert_eq!(prices.len(), 2);
    assert_eq!(prices[0].date, date(2024, 1, 10));
    assert_eq!(prices[0].price, dec!(162.23));
    assert_eq!(prices[1].price, dec!(165.8));
    assert!(prices.iter().all(|p| p.currency == "USD"));
    assert!(prices
        .iter()
        .all(|p| p.exchange_operating_mic.as_deref() == Some("XNYS")));
}

#[tokio::test]
async fn test_security_prices_use_listing_currency_on_fallback() {
    let upstream = ScriptedTransport::bodies(&[
        "{}",
        r#"{"bestMatches": [{"1. symbol": "TSCO.LON", "2. name": "Tesco PLC",
            "3. type": "Equity", "4. region": "United Kingdom", "8. currency": "GBX"}]}"#,
        r#"{"Time Series (Daily)": {"2024-01-12": {"4. close": "285.1000"}}}"#,
    ]);
    let provider = provider_with(&upstream);

    let price = provider
        .fetch_security_price("TSCO.LON", None, date(2024, 1, 12))
        .await
        .unwrap();

    assert_eq!(
        upstream.functions(),
        vec!["OVERVIEW", "SYMBOL_SEARCH", "TIME_SERIES_DAILY"]
    );
    assert_eq!(price.currency, "GBX");
    assert_eq!(price.price, dec!(285.1));
    assert_eq!(price.exchange_operating_mic, None);
}

#[tokio::test]
async fn test_single_price_without_row_is_empty_result() {
    let upstream = ScriptedTransport::bodies(&[IBM_OVERVIEW, IBM_DAILY]);
    let provider = provider_with(&upstream);
    let day = date(2024, 1, 11);

    let error = provider
        .fetch_security_price("IBM", None, day)
        .await
        .unwrap_err();

    assert_eq!(error, MarketDataError::EmptyResult { date: day });
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_maps_regions_to_country_codes() {
    let upstream = ScriptedTransport::bodies(&[r#"{"bestMatches": [
        {"1. symbol": "TSCO.LON", "2. name": "Tesco PLC", "4. region": "United Kingdom"},
        {"1. symbol": "TSCDF", "2. name": "Tesco plc", "4. region": "United States"},
        {"1. symbol": "TCO0.FRK", "2. name": "Tesco PLC", "4. region": "Frankfurt"},
        {"1. symbol": "TSCO.BSE", "2. name": "Tesco", "4. region": "India/Bombay"}
    ]}"#]);
    let provider = provider_with(&upstream);

    let results = provider.search_securities("tesco").await.unwrap();

    let codes: Vec<_> = results
        .iter()
        .map(|r| r.country_code.as_deref())
        .collect();
    assert_eq!(codes, vec![Some("GB"), Some("US"), Some("DE"), Some("IN")]);
    assert_eq!(results[0].symbol, "TSCO.LON");
    assert_eq!(results[0].name, "Tesco PLC");
}

#[tokio::test]
async fn test_search_without_matches_is_empty() {
    let upstream = ScriptedTransport::bodies(&[r#"{"bestMatches": []}"#]);
    let provider = provider_with(&upstream);

    assert!(provider.search_securities("zzzz").await.unwrap().is_empty());
}

// =============================================================================
// Health check
// =============================================================================

#[tokio::test]
async fn test_health_check_reports_false_without_realtime_key() {
    let upstream = ScriptedTransport::bodies(&[r#"{"Meta Data": {}}"#]);
    let provider = provider_with(&upstream);

    assert_eq!(provider.healthy().await, Ok(false));
    assert_eq!(upstream.param_values("from_currency"), vec!["USD"]);
    assert_eq!(upstream.param_values("to_currency"), vec!["EUR"]);
}

#[tokio::test]
async fn test_health_check_reports_false_without_api_key() {
    let upstream = ScriptedTransport::bodies(&[r#"{
        "Error Message": "the parameter apikey is invalid or missing. Please claim your free API key on (https://www.alphavantage.co/support/#api-key)."
    }"#]);
    let mut config = fast_config();
    config.api_key = String::new();
    let provider = AlphaVantageProvider::with_transport(config, upstream.clone()).unwrap();

    assert_eq!(provider.healthy().await, Ok(false));
    assert_eq!(upstream.param_values("apikey"), vec![""]);
}

#[tokio::test]
async fn test_health_check_reports_false_on_transport_failure() {
    let upstream = ScriptedTransport::new(vec![
        Err(TransportFailure::Connect("refused".to_string())),
        Err(TransportFailure::Connect("refused".to_string())),
        Err(TransportFailure::Connect("refused".to_string())),
    ]);
    let provider = provider_with(&upstream);

    assert_eq!(provider.healthy().await, Ok(false));
    assert_eq!(upstream.calls(), 3);
}

#[tokio::test]
async fn test_health_check_reports_true_with_realtime_rate() {
    let upstream = ScriptedTransport::bodies(&[r#"{"Realtime Currency Exchange Rate": {
        "5. Exchange Rate": "0.91",
        "6. Last Refreshed": "2024-01-15 10:00:01"
    }}"#]);
    let provider = provider_with(&upstream);

    assert_eq!(provider.healthy().await, Ok(true));
}

// =============================================================================
// Credential hygiene
// =============================================================================

#[tokio::test]
async fn test_transport_error_text_omits_api_key() {
    let failure = || {
        Err(TransportFailure::Connect(
            "error sending request for url (https://example.test/query?apikey=SECRET123)"
                .to_string(),
        ))
    };
    let upstream = ScriptedTransport::new(vec![failure(), failure(), failure()]);
    let provider = provider_with(&upstream);

    let error = provider.fetch_latest_exchange_rate("EUR", "USD").await.unwrap_err();

    assert_eq!(upstream.calls(), 3);
    assert!(matches!(error, MarketDataError::Transport { status: None, .. }));
    assert!(!error.to_string().contains("SECRET123"));
    assert!(!format!("{:?}", error).contains("SECRET123"));
}

#[tokio::test]
async fn test_huge_compact_window_does_not_abort_the_call() {
    let upstream = ScriptedTransport::bodies(&[EUR_USD_DAILY]);
    let mut config = fast_config();
    config.compact_window_days = 1_000_000_000;
    let provider = AlphaVantageProvider::with_transport(config, upstream.clone()).unwrap();
    let day = date(2023, 1, 2);

    let rates = provider.fetch_exchange_rates("EUR", "USD", day, day).await.unwrap();

    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].rate, dec!(1.06));
}
