//! 파생 컬럼 계산.
//!
//! I/O가 없는 순수 함수만 포함합니다.
//!
//! # 파생 컬럼
//!
//! | 컬럼 | 계산 |
//! |------|------|
//! | `price_change` | 종가 - 시가 |
//! | `volume_change` | 같은 심볼의 직전 행(시각 순) 대비 거래량 변화율 |
//! | `hour` | 시각 (텍스트, 0 패딩 없음) |
//! | `month` | 월 |
//! | `season` | 월 → 계절 |
//! | `price_per_volume` | 종가 / 거래량 (거래량 0이면 없음) |
//! | `sentiment` | `Neutral` 고정 |
//! | `trade_date` | 거래일 |

use chrono::{Datelike, Timelike};

use crate::domain::{CandleRow, EnrichedRow, RowSource, Season, Sentiment};

/// 종가 - 시가.
pub fn price_change(open: Option<f64>, close: Option<f64>) -> Option<f64> {
    Some(close? - open?)
}

/// 거래량 변화율 (`(current - previous) / previous`).
///
/// 직전 거래량이 0이면 정의되지 않습니다.
pub fn pct_change(previous: Option<i64>, current: Option<i64>) -> Option<f64> {
    let previous = previous?;
    let current = current?;
    if previous == 0 {
        return None;
    }
    Some((current - previous) as f64 / previous as f64)
}

/// 종가 / 거래량. 거래량이 0이면 정의되지 않습니다.
pub fn price_per_volume(close: Option<f64>, volume: Option<i64>) -> Option<f64> {
    let volume = volume?;
    if volume == 0 {
        return None;
    }
    Some(close? / volume as f64)
}

/// 수집한 캔들에 파생 컬럼을 추가합니다. 입력 순서를 유지합니다.
pub fn enrich(candles: Vec<CandleRow>) -> Vec<EnrichedRow> {
    let volume_changes = volume_changes(&candles);

    candles
        .into_iter()
        .zip(volume_changes)
        .map(|(candle, volume_change)| enrich_row(candle, volume_change))
        .collect()
}

/// 계절을 월 기준으로 다시 계산하고 필수 필드가 없는 행을 제거합니다.
pub fn finalize(rows: Vec<EnrichedRow>) -> Vec<EnrichedRow> {
    rows.into_iter()
        .map(|mut row| {
            row.season = row.month.map(Season::from_month).unwrap_or(Season::Unknown);
            row
        })
        .filter(EnrichedRow::is_complete)
        .collect()
}

/// `enrich` 후 `finalize`.
pub fn transform(candles: Vec<CandleRow>) -> Vec<EnrichedRow> {
    finalize(enrich(candles))
}

fn enrich_row(candle: CandleRow, volume_change: Option<f64>) -> EnrichedRow {
    let timestamp = candle.timestamp;
    let month = timestamp.map(|t| t.month());

    EnrichedRow {
        price_change: price_change(candle.open, candle.close),
        volume_change,
        hour: timestamp.map(|t| t.hour().to_string()),
        month,
        season: month.map(Season::from_month).unwrap_or(Season::Unknown),
        price_per_volume: price_per_volume(candle.close, candle.volume),
        sentiment: Sentiment::Neutral,
        trade_date: timestamp.map(|t| t.date_naive()),
        source: RowSource::Live,
        candle,
    }
}

/// 심볼별로 시각 순 정렬 후 직전 행 대비 거래량 변화율을 계산합니다.
///
/// 반환값은 입력과 같은 인덱스를 가집니다.
fn volume_changes(candles: &[CandleRow]) -> Vec<Option<f64>> {
    let mut order: Vec<usize> = (0..candles.len()).collect();
    order.sort_by(|&a, &b| {
        candles[a]
            .symbol
            .cmp(&candles[b].symbol)
            .then(candles[a].timestamp.cmp(&candles[b].timestamp))
    });

    let mut changes = vec![None; candles.len()];
    for pair in order.windows(2) {
        let (prev, cur) = (&candles[pair[0]], &candles[pair[1]]);
        if cur.symbol.is_some() && prev.symbol == cur.symbol {
            changes[pair[1]] = pct_change(prev.volume, cur.volume);
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_714_521_600, 0).unwrap() + Duration::days(offset)
    }

    fn candle(symbol: &str, offset: i64, close: f64, volume: i64) -> CandleRow {
        CandleRow::new(symbol, day(offset), 100.0, 110.0, 90.0, close, volume)
    }

    #[test]
    fn test_price_change() {
        assert_eq!(price_change(Some(100.0), Some(105.0)), Some(5.0));
        assert_eq!(price_change(None, Some(105.0)), None);
    }

    #[test]
    fn test_price_per_volume() {
        assert_eq!(price_per_volume(Some(150.0), Some(1_000_000)), Some(0.00015));
        assert_eq!(price_per_volume(Some(150.0), Some(0)), None);
        assert_eq!(price_per_volume(None, Some(10)), None);
    }

    #[test]
    fn test_volume_change_first_row_absent() {
        let rows = enrich(vec![candle("AAPL", 0, 105.0, 100), candle("AAPL", 1, 106.0, 150)]);

        assert_eq!(rows[0].volume_change, None);
        assert_eq!(rows[1].volume_change, Some(0.5));
    }

    #[test]
    fn test_volume_change_is_per_symbol_and_time_ordered() {
        // 입력 순서가 섞여 있어도 심볼/시각 기준으로 계산
        let rows = enrich(vec![
            candle("MSFT", 1, 400.0, 300),
            candle("AAPL", 1, 106.0, 150),
            candle("MSFT", 0, 401.0, 200),
            candle("AAPL", 0, 105.0, 100),
        ]);

        assert_eq!(rows[0].volume_change, Some(0.5));
        assert_eq!(rows[1].volume_change, Some(0.5));
        assert_eq!(rows[2].volume_change, None);
        assert_eq!(rows[3].volume_change, None);
        // 입력 순서 유지
        assert_eq!(rows[0].symbol(), Some("MSFT"));
        assert_eq!(rows[3].symbol(), Some("AAPL"));
    }

    #[test]
    fn test_volume_change_after_zero_volume_is_absent() {
        let rows = enrich(vec![candle("AAPL", 0, 105.0, 0), candle("AAPL", 1, 106.0, 150)]);
        assert_eq!(rows[1].volume_change, None);
    }

    #[test]
    fn test_time_bucket_fields() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 3, 14, 30, 0).unwrap();
        let rows = enrich(vec![CandleRow::new("TSLA", ts, 1.0, 1.0, 1.0, 1.0, 1)]);
        let row = &rows[0];

        assert_eq!(row.hour.as_deref(), Some("14"));
        assert_eq!(row.month, Some(10));
        assert_eq!(row.season, Season::Fall);
        assert_eq!(row.sentiment, Sentiment::Neutral);
        assert_eq!(row.trade_date.map(|d| d.to_string()), Some("2024-10-03".to_string()));
        assert_eq!(row.source, RowSource::Live);
    }

    #[test]
    fn test_hour_is_unpadded() {
        let rows = enrich(vec![candle("AAPL", 0, 105.0, 1000)]);
        assert_eq!(rows[0].hour.as_deref(), Some("0"));
    }

    #[test]
    fn test_row_without_volume_is_dropped() {
        let mut missing_volume = candle("AAPL", 1, 106.0, 0);
        missing_volume.volume = None;

        let rows = transform(vec![candle("AAPL", 0, 105.0, 1000), missing_volume]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].candle.volume, Some(1000));
    }

    #[test]
    fn test_rows_missing_required_fields_are_dropped() {
        let mut no_symbol = candle("AAPL", 0, 105.0, 1000);
        no_symbol.symbol = None;
        let mut no_close = candle("AAPL", 1, 105.0, 1000);
        no_close.close = None;
        let mut no_timestamp = candle("AAPL", 2, 105.0, 1000);
        no_timestamp.timestamp = None;
        let mut no_open = candle("AAPL", 3, 105.0, 1000);
        no_open.open = None;

        let rows = transform(vec![no_symbol, no_close, no_timestamp, no_open]);

        // open은 선택 필드
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price_change, None);
    }

    #[test]
    fn test_finalize_recomputes_season_from_month() {
        let mut rows = enrich(vec![candle("AAPL", 0, 105.0, 1000)]);
        rows[0].season = Season::Unknown;
        rows[0].month = Some(1);

        let rows = finalize(rows);
        assert_eq!(rows[0].season, Season::Winter);
    }

    #[test]
    fn test_single_candle_scenario() {
        let rows = transform(vec![candle("AAPL", 0, 105.0, 1000)]);
        let row = &rows[0];

        assert_eq!(row.price_change, Some(5.0));
        assert_eq!(row.price_per_volume, Some(0.105));
        assert_eq!(row.month, Some(5));
        assert_eq!(row.season, Season::Spring);
    }

    proptest! {
        #[test]
        fn prop_season_is_total(month in 0u32..100) {
            let season = Season::from_month(month);
            prop_assert_eq!(season == Season::Unknown, !(1..=12).contains(&month));
        }

        #[test]
        fn prop_price_per_volume_defined_iff_volume_nonzero(
            close in 0.01f64..10_000.0,
            volume in 0i64..1_000_000_000,
        ) {
            let ratio = price_per_volume(Some(close), Some(volume));
            prop_assert_eq!(ratio.is_some(), volume != 0);
            if let Some(r) = ratio {
                prop_assert!((r * volume as f64 - close).abs() < 1e-6 * close.max(1.0));
            }
        }

        #[test]
        fn prop_enrich_keeps_row_count(volumes in proptest::collection::vec(0i64..10_000, 0..20)) {
            let candles: Vec<CandleRow> = volumes
                .iter()
                .enumerate()
                .map(|(i, v)| candle("AAPL", i as i64, 100.0, *v))
                .collect();
            let rows = enrich(candles);

            prop_assert_eq!(rows.len(), volumes.len());
            if let Some(first) = rows.first() {
                prop_assert!(first.volume_change.is_none());
            }
        }
    }
}
