//! 일봉 캔들 행 타입.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::season::Season;

/// 행의 출처.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowSource {
    /// 시세 API에서 수집한 실제 데이터
    #[default]
    Live,
    /// API 수집이 모두 실패했을 때 생성한 샘플 데이터
    Synthetic,
}

/// 시장 심리 라벨.
///
/// 실제 데이터는 항상 `Neutral`이며 샘플 데이터만 임의의 값을 가집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// 샘플 생성 시 선택 가능한 라벨.
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API에서 수집한 일봉 원본 행.
///
/// API가 길이가 다른 배열을 반환할 수 있으므로 모든 필드가 선택적입니다.
/// 필수 필드 검증은 변환 단계에서 수행됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleRow {
    /// 종목 심볼 (예: AAPL)
    pub symbol: Option<String>,
    /// 캔들 시각 (UTC)
    pub timestamp: Option<DateTime<Utc>>,
    /// 시가
    pub open: Option<f64>,
    /// 고가
    pub high: Option<f64>,
    /// 저가
    pub low: Option<f64>,
    /// 종가
    pub close: Option<f64>,
    /// 거래량
    pub volume: Option<i64>,
}

impl CandleRow {
    /// 모든 필드가 채워진 캔들 행을 생성합니다.
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            symbol: Some(symbol.into()),
            timestamp: Some(timestamp),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }
}

/// 파생 컬럼이 추가된 행.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    /// 원본 캔들
    pub candle: CandleRow,
    /// 종가 - 시가
    pub price_change: Option<f64>,
    /// 직전 행 대비 거래량 변화율 (0.5 = 50%)
    pub volume_change: Option<f64>,
    /// 시각 (0~23, 텍스트)
    pub hour: Option<String>,
    /// 월 (1~12)
    pub month: Option<u32>,
    /// 계절
    pub season: Season,
    /// 종가 / 거래량
    pub price_per_volume: Option<f64>,
    /// 시장 심리 라벨
    pub sentiment: Sentiment,
    /// 거래일 (YYYY-MM-DD)
    pub trade_date: Option<NaiveDate>,
    /// 데이터 출처
    pub source: RowSource,
}

impl EnrichedRow {
    pub fn symbol(&self) -> Option<&str> {
        self.candle.symbol.as_deref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.candle.timestamp
    }

    /// 필수 필드(timestamp, symbol, close, volume)가 모두 있는지 확인합니다.
    pub fn is_complete(&self) -> bool {
        self.candle.timestamp.is_some()
            && self.candle.symbol.is_some()
            && self.candle.close.is_some()
            && self.candle.volume.is_some()
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == RowSource::Synthetic
    }
}
