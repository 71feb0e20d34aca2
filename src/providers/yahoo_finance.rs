use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::period::LookbackPeriod;
use crate::core::price::{PriceSeries, SeriesProvider};

const USER_AGENT: &str = concat!("macrodash/", env!("CARGO_PKG_VERSION"));

/// Daily closes from the Yahoo Finance chart endpoint.
pub struct YahooFinanceProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooFinanceProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(YahooFinanceProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Deserialize, Debug)]
struct YahooChartResponse {
    chart: ChartEnvelope,
}

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    result: Option<Vec<ChartItem>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    #[serde(default)]
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Deserialize, Debug)]
struct ChartMeta {
    /// Seconds east of UTC for the exchange the symbol trades on.
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

fn to_exchange_date(ts: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}

/// Pairs timestamps with closes, dropping bars without a close.
fn extract_points(item: &ChartItem) -> Vec<(NaiveDate, f64)> {
    let offset = item.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);
    let (Some(timestamps), Some(closes)) = (
        item.timestamp.as_ref(),
        item.indicators
            .as_ref()
            .and_then(|inds| inds.quote.first())
            .and_then(|q| q.close.as_ref()),
    ) else {
        return Vec::new();
    };

    timestamps
        .iter()
        .zip(closes)
        .filter_map(|(&ts, &close)| {
            let close = close.filter(|c| c.is_finite())?;
            Some((to_exchange_date(ts, offset)?, close))
        })
        .collect()
}

#[async_trait]
impl SeriesProvider for YahooFinanceProvider {
    #[instrument(
        name = "YahooSeriesFetch",
        skip(self),
        fields(symbol = %symbol, period = %period)
    )]
    async fn fetch_series(&self, symbol: &str, period: LookbackPeriod) -> Result<PriceSeries> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range={}",
            self.base_url,
            symbol,
            period.as_range()
        );
        debug!("Requesting series from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for symbol: {}", e, symbol))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for {symbol}"))?;

        let data: Option<YahooChartResponse> = serde_json::from_str(&text).ok();
        if let Some(error) = data.as_ref().and_then(|d| d.chart.error.as_ref()) {
            return Err(anyhow!(
                "{}: {}",
                error.code.as_deref().unwrap_or("error"),
                error.description.as_deref().unwrap_or("no description")
            ));
        }
        if !status.is_success() {
            return Err(anyhow!("HTTP error: {} for symbol: {}", status, symbol));
        }

        let data = data.ok_or_else(|| anyhow!("Failed to parse JSON response for {}", symbol))?;
        let item = data
            .chart
            .result
            .as_ref()
            .and_then(|result| result.first())
            .ok_or_else(|| anyhow!("No price data found for symbol: {}", symbol))?;

        let series = PriceSeries::new(symbol, extract_points(item));
        debug!(points = series.len(), "Parsed series");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(symbol: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v8/finance/chart/{symbol}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_successful_series_fetch() {
        // Three sessions opening 2024-01-02 14:30 UTC, the middle one without a close
        let mock_response = r#"{
            "chart": {
                "result": [{
                    "meta": { "currency": "USD", "gmtoffset": -18000 },
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": { "quote": [{ "close": [3.95, null, 3.99] }] }
                }],
                "error": null
            }
        }"#;

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/TNX"))
            .and(query_param("range", "1mo"))
            .and(query_param("interval", "1d"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = YahooFinanceProvider::new(&mock_server.uri()).unwrap();
        let series = provider
            .fetch_series("TNX", LookbackPeriod::OneMonth)
            .await
            .unwrap();

        assert_eq!(series.symbol, "TNX");
        assert_eq!(
            series.points,
            vec![(d("2024-01-02"), 3.95), (d("2024-01-04"), 3.99)]
        );
    }

    #[tokio::test]
    async fn test_missing_bars_yield_empty_series() {
        let mock_response = r#"{"chart": {"result": [{"meta": {}}], "error": null}}"#;
        let mock_server = create_mock_server("GC=F", 200, mock_response).await;

        let provider = YahooFinanceProvider::new(&mock_server.uri()).unwrap();
        let series = provider
            .fetch_series("GC=F", LookbackPeriod::OneYear)
            .await
            .unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_offset_drops_bars() {
        let mock_response = format!(
            r#"{{"chart": {{"result": [{{
                "meta": {{"gmtoffset": {}}},
                "timestamp": [1704205800],
                "indicators": {{"quote": [{{"close": [4.2]}}]}}
            }}], "error": null}}}}"#,
            i64::MAX
        );
        let mock_server = create_mock_server("IRX", 200, &mock_response).await;

        let provider = YahooFinanceProvider::new(&mock_server.uri()).unwrap();
        let series = provider
            .fetch_series("IRX", LookbackPeriod::OneMonth)
            .await
            .unwrap();
        assert!(series.is_empty());
        assert_eq!(to_exchange_date(i64::MIN, -1), None);
        assert_eq!(to_exchange_date(1704205800, -18000), Some(d("2024-01-02")));
    }

    #[tokio::test]
    async fn test_no_result_data() {
        let mock_response = r#"{"chart": {"result": []}}"#;
        let mock_server = create_mock_server("INVALID", 200, mock_response).await;

        let provider = YahooFinanceProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_series("INVALID", LookbackPeriod::OneMonth).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No price data found for symbol: INVALID"
        );
    }

    #[tokio::test]
    async fn test_chart_error_object() {
        let mock_response = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;
        let mock_server = create_mock_server("DELISTED", 404, mock_response).await;

        let provider = YahooFinanceProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_series("DELISTED", LookbackPeriod::OneMonth).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Not Found: No data found, symbol may be delisted"
        );
    }

    #[tokio::test]
    async fn test_http_error_response() {
        let mock_server = create_mock_server("IRX", 500, "").await;

        let provider = YahooFinanceProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_series("IRX", LookbackPeriod::OneMonth).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for symbol: IRX"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_response = r#"{"chart": {"results": []}}"#;
        let mock_server = create_mock_server("TIP", 200, mock_response).await;

        let provider = YahooFinanceProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_series("TIP", LookbackPeriod::OneMonth).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("No price data found for symbol: TIP")
        );
    }
}
