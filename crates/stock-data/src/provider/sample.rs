//! 샘플 데이터 생성기.
//!
//! 모든 심볼의 API 수집이 실패했을 때 하위 단계가 빈 입력을 받지 않도록
//! 임의의 행을 생성합니다. 생성된 행은 `RowSource::Synthetic`으로 표시되어
//! 실제 데이터와 구분됩니다.

use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use stock_core::{CandleRow, EnrichedRow, RowSource, Season, Sentiment};

/// 심볼별로 `days`개의 샘플 행을 생성합니다.
///
/// 각 행의 시각은 `now`에서 0..days일 전이며 파생 컬럼도 임의 값으로 채웁니다.
pub fn generate_sample_rows<R: Rng + ?Sized>(
    symbols: &[String],
    days: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<EnrichedRow> {
    let mut rows = Vec::with_capacity(symbols.len() * days);

    for symbol in symbols {
        for i in 0..days {
            let timestamp = now - Duration::days(i as i64);
            let month = timestamp.month();

            rows.push(EnrichedRow {
                candle: CandleRow {
                    symbol: Some(symbol.clone()),
                    timestamp: Some(timestamp),
                    open: Some(rng.gen_range(100.0..200.0)),
                    high: Some(rng.gen_range(200.0..250.0)),
                    low: Some(rng.gen_range(50.0..100.0)),
                    close: Some(rng.gen_range(100.0..200.0)),
                    volume: Some(rng.gen_range(1_000_000..10_000_000)),
                },
                price_change: Some(rng.gen_range(-10.0..10.0)),
                volume_change: Some(rng.gen_range(-0.5..0.5)),
                hour: Some(rng.gen_range(0..24).to_string()),
                month: Some(month),
                season: Season::from_month(month),
                price_per_volume: Some(rng.gen_range(0.00001..0.0001)),
                sentiment: Sentiment::ALL[rng.gen_range(0..Sentiment::ALL.len())],
                trade_date: Some(timestamp.date_naive()),
                source: RowSource::Synthetic,
            });
        }
    }

    rows
}
