//! 처리 결과 요약 모듈.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use stock_core::EnrichedRow;

/// 최종 데이터 요약
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSummary {
    /// 총 행 수
    pub total_records: usize,
    /// 고유 심볼 수
    pub unique_symbols: usize,
    /// 가장 이른 시각
    pub first_timestamp: Option<DateTime<Utc>>,
    /// 가장 늦은 시각
    pub last_timestamp: Option<DateTime<Utc>>,
    /// 샘플 데이터 여부
    pub synthetic: bool,
}

impl DataSummary {
    pub fn from_rows(rows: &[EnrichedRow]) -> Self {
        let symbols: HashSet<&str> = rows.iter().filter_map(EnrichedRow::symbol).collect();
        let timestamps = rows.iter().filter_map(EnrichedRow::timestamp);

        Self {
            total_records: rows.len(),
            unique_symbols: symbols.len(),
            first_timestamp: timestamps.clone().min(),
            last_timestamp: timestamps.max(),
            synthetic: rows.iter().any(EnrichedRow::is_synthetic),
        }
    }

    /// 요약 로그 출력
    pub fn log(&self) {
        tracing::info!(
            total_records = self.total_records,
            unique_symbols = self.unique_symbols,
            from = ?self.first_timestamp,
            to = ?self.last_timestamp,
            synthetic = self.synthetic,
            "최종 데이터 요약"
        );
    }
}

/// 앞쪽 `limit`개 행 미리보기 출력
pub fn log_preview(rows: &[EnrichedRow], limit: usize) {
    for row in rows.iter().take(limit) {
        tracing::info!(
            timestamp = ?row.timestamp(),
            symbol = row.symbol().unwrap_or("-"),
            close = ?row.candle.close,
            volume = ?row.candle.volume,
            season = %row.season,
            hour = row.hour.as_deref().unwrap_or("-"),
            sentiment = %row.sentiment,
            "샘플"
        );
    }
}
