//! 검색 인덱스 문서 (와이어 표현).

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use super::candle::{EnrichedRow, Sentiment};
use super::season::Season;
use crate::error::{CoreError, CoreResult};

/// 인덱스에 저장되는 문서.
///
/// 선택 필드는 값이 없으면 `null` 대신 키 자체를 생략합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// RFC 3339 UTC 시각
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    pub symbol: String,
    pub close: f64,
    pub volume: i64,
    pub hour: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    pub season: Season,
    pub sentiment: Sentiment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_volume: Option<f64>,
    /// 거래일 (YYYY-MM-DD)
    #[serde(rename = "trip_date", skip_serializing_if = "Option::is_none")]
    pub trade_date: Option<String>,
}

impl TryFrom<&EnrichedRow> for IndexDocument {
    type Error = CoreError;

    fn try_from(row: &EnrichedRow) -> CoreResult<Self> {
        let candle = &row.candle;
        let timestamp = candle
            .timestamp
            .ok_or(CoreError::MissingField("@timestamp"))?;
        let symbol = candle
            .symbol
            .clone()
            .ok_or(CoreError::MissingField("symbol"))?;
        let close = finite(candle.close).ok_or(CoreError::MissingField("close"))?;
        let volume = candle.volume.ok_or(CoreError::MissingField("volume"))?;

        Ok(Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            symbol,
            close,
            volume,
            hour: row.hour.clone().unwrap_or_else(|| "0".to_string()),
            month: row.month,
            season: row.season,
            sentiment: row.sentiment,
            open: finite(candle.open),
            high: finite(candle.high),
            low: finite(candle.low),
            price_change: finite(row.price_change),
            volume_change: finite(row.volume_change),
            price_per_volume: finite(row.price_per_volume),
            trade_date: row.trade_date.map(|d| d.format("%Y-%m-%d").to_string()),
        })
    }
}

/// NaN/무한대는 누락 값으로 취급합니다 (JSON 직렬화 시 null이 되므로).
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
