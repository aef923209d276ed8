//! Finnhub 시세 API 클라이언트.
//!
//! `GET /stock/candle`로 일봉(`resolution=D`) 데이터를 조회합니다.
//!
//! # 응답 형식
//!
//! ```json
//! {"s": "ok", "t": [1714521600], "o": [100.0], "h": [110.0], "l": [90.0], "c": [105.0], "v": [1000]}
//! ```
//!
//! `s`가 `"ok"`가 아니면 (예: `"no_data"`) 해당 심볼은 실패로 처리합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use stock_data::provider::{CandleProvider, FinnhubClient};
//!
//! let client = FinnhubClient::new("YOUR_API_KEY", FinnhubClient::DEFAULT_BASE_URL, timeout)?;
//! let candles = client.fetch_daily_candles("AAPL", 1714521600, now).await?;
//! ```

use async_trait::async_trait;
use chrono::DateTime;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use stock_core::CandleRow;

use super::CandleProvider;
use crate::error::{DataError, Result};

/// Finnhub API 클라이언트.
pub struct FinnhubClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

/// `/stock/candle` 응답.
///
/// 배열 길이가 서로 다를 수 있으므로 모든 배열은 선택적입니다.
#[derive(Debug, Default, Deserialize)]
pub struct CandleResponse {
    /// 상태 ("ok", "no_data")
    #[serde(rename = "s", default)]
    pub status: Option<String>,
    #[serde(rename = "t", default)]
    pub timestamps: Option<Vec<i64>>,
    #[serde(rename = "o", default)]
    pub open: Option<Vec<Option<f64>>>,
    #[serde(rename = "h", default)]
    pub high: Option<Vec<Option<f64>>>,
    #[serde(rename = "l", default)]
    pub low: Option<Vec<Option<f64>>>,
    #[serde(rename = "c", default)]
    pub close: Option<Vec<Option<f64>>>,
    /// 거래량 (정수 또는 실수)
    #[serde(rename = "v", default)]
    pub volume: Option<Vec<Option<f64>>>,
}

impl FinnhubClient {
    /// Finnhub API 기본 URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://finnhub.io/api/v1";

    /// 새 클라이언트를 생성합니다.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            api_key: SecretString::from(api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 캔들 응답을 행으로 변환합니다.
    ///
    /// 타임스탬프 하나당 한 행을 생성하며, 다른 배열이 더 짧으면
    /// 해당 값은 누락으로 남깁니다.
    pub fn parse_candles(symbol: &str, response: CandleResponse) -> Result<Vec<CandleRow>> {
        let status = response.status.as_deref().unwrap_or("unknown error");
        if status != "ok" {
            return Err(DataError::ApiStatus(status.to_string()));
        }

        let timestamps = response.timestamps.unwrap_or_default();
        let value_at = |values: &Option<Vec<Option<f64>>>, idx: usize| {
            values.as_ref().and_then(|v| v.get(idx).copied().flatten())
        };

        let rows = timestamps
            .iter()
            .enumerate()
            .map(|(idx, &t)| CandleRow {
                symbol: Some(symbol.to_string()),
                timestamp: DateTime::from_timestamp(t, 0),
                open: value_at(&response.open, idx),
                high: value_at(&response.high, idx),
                low: value_at(&response.low, idx),
                close: value_at(&response.close, idx),
                volume: value_at(&response.volume, idx).map(|v| v.round() as i64),
            })
            .collect();

        Ok(rows)
    }
}

#[async_trait]
impl CandleProvider for FinnhubClient {
    fn name(&self) -> &str {
        "finnhub"
    }

    async fn fetch_daily_candles(
        &self,
        symbol: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<CandleRow>> {
        let url = format!("{}/stock/candle", self.base_url);
        let from = from.to_string();
        let to = to.to_string();

        tracing::debug!(symbol = symbol, url = %url, "Finnhub 캔들 요청");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("resolution", "D"),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("token", self.api_key.expose_secret()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::from_status(status, body));
        }

        let data: CandleResponse = response.json().await?;
        Self::parse_candles(symbol, data)
    }
}
