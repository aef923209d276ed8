//! 일봉 수집 모듈.

use chrono::{DateTime, Utc};
use std::time::Instant;
use stock_core::{CandleRow, EnrichedRow};
use stock_data::{generate_sample_rows, CandleProvider};

use crate::config::{FinnhubConfig, SampleConfig};
use crate::CollectionStats;

/// 수집 결과
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// API에서 수집한 실제 데이터 (파생 컬럼 계산 전)
    Fetched(Vec<CandleRow>),
    /// 모든 심볼이 실패하여 생성한 샘플 데이터
    SampleSynthesized(Vec<EnrichedRow>),
}

impl FetchOutcome {
    pub fn len(&self) -> usize {
        match self {
            Self::Fetched(rows) => rows.len(),
            Self::SampleSynthesized(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::SampleSynthesized(_))
    }
}

/// 심볼별 일봉 수집.
///
/// 심볼마다 한 번씩 요청하고 실패한 심볼은 건너뜁니다 (재시도 없음).
/// 요청 후에는 항상 고정 딜레이만큼 대기합니다.
/// 성공한 심볼이 하나도 없으면 샘플 데이터를 생성합니다.
pub async fn fetch_candles(
    provider: &dyn CandleProvider,
    finnhub: &FinnhubConfig,
    sample: &SampleConfig,
    now: DateTime<Utc>,
) -> (FetchOutcome, CollectionStats) {
    let start = Instant::now();
    let mut stats = CollectionStats::new();
    let mut candles = Vec::new();
    let to = now.timestamp();

    tracing::info!(
        provider = provider.name(),
        symbols = finnhub.symbols.len(),
        from = finnhub.from_epoch,
        to = to,
        "일봉 수집 시작"
    );

    for (idx, symbol) in finnhub.symbols.iter().enumerate() {
        tracing::info!(
            symbol = %symbol,
            progress = format!("{}/{}", idx + 1, finnhub.symbols.len()),
            "수집 중"
        );

        match provider
            .fetch_daily_candles(symbol, finnhub.from_epoch, to)
            .await
        {
            Ok(rows) => {
                stats.record_rows(rows.len());
                if rows.is_empty() {
                    tracing::warn!(symbol = %symbol, "데이터 없음");
                } else {
                    tracing::info!(symbol = %symbol, records = rows.len(), "수집 완료");
                    candles.extend(rows);
                }
            }
            Err(e) => {
                stats.record_error();
                tracing::error!(symbol = %symbol, error = %e, "수집 실패");
            }
        }

        // Rate limiting
        tokio::time::sleep(finnhub.request_delay()).await;
    }

    stats.elapsed = start.elapsed();

    if stats.nothing_fetched() {
        tracing::warn!(
            days_per_symbol = sample.days_per_symbol,
            "수집된 데이터가 없습니다. 테스트용 샘플 데이터를 생성합니다"
        );
        let rows = synthesize(&finnhub.symbols, sample, now);
        return (FetchOutcome::SampleSynthesized(rows), stats);
    }

    (FetchOutcome::Fetched(candles), stats)
}

fn synthesize(symbols: &[String], sample: &SampleConfig, now: DateTime<Utc>) -> Vec<EnrichedRow> {
    let mut rng = rand::thread_rng();
    generate_sample_rows(symbols, sample.days_per_symbol, now, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use stock_data::DataError;

    /// 네트워크 없이 심볼별 응답을 흉내 내는 Provider
    struct StubProvider {
        responses: HashMap<String, Vec<CandleRow>>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CandleProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch_daily_candles(
            &self,
            symbol: &str,
            _from: i64,
            _to: i64,
        ) -> stock_data::Result<Vec<CandleRow>> {
            self.calls.lock().unwrap().push(symbol.to_string());
            self.responses
                .get(symbol)
                .cloned()
                .ok_or_else(|| DataError::ApiStatus("no_data".to_string()))
        }
    }

    fn finnhub(symbols: &[&str]) -> FinnhubConfig {
        FinnhubConfig {
            api_key: SecretString::from("test".to_string()),
            base_url: "http://unused".to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            from_epoch: 1_714_521_600,
            request_delay_ms: 0,
            timeout_secs: 1,
        }
    }

    fn stub(responses: Vec<(&str, Vec<CandleRow>)>) -> StubProvider {
        StubProvider {
            responses: responses
                .into_iter()
                .map(|(s, rows)| (s.to_string(), rows))
                .collect(),
            calls: Default::default(),
        }
    }

    fn candles(symbol: &str, count: i64) -> Vec<CandleRow> {
        (0..count)
            .map(|i| {
                let ts = DateTime::from_timestamp(1_714_521_600 + i * 86_400, 0).unwrap();
                CandleRow::new(symbol, ts, 1.0, 2.0, 0.5, 1.5, 100 + i)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_failed_symbols_are_skipped() {
        let provider = stub(vec![("AAPL", candles("AAPL", 3)), ("MSFT", vec![])]);
        let sample = SampleConfig { days_per_symbol: 30 };

        let (outcome, stats) =
            fetch_candles(&provider, &finnhub(&["AAPL", "TSLA", "MSFT"]), &sample, Utc::now())
                .await;

        assert!(!outcome.is_synthetic());
        assert_eq!(outcome.len(), 3);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.empty, 1);
        assert_eq!(stats.total_rows, 3);
        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec!["AAPL".to_string(), "TSLA".to_string(), "MSFT".to_string()]
        );
    }

    #[tokio::test]
    async fn test_all_failures_synthesize_sample_rows() {
        let provider = stub(vec![]);
        let sample = SampleConfig { days_per_symbol: 4 };

        let (outcome, stats) =
            fetch_candles(&provider, &finnhub(&["AAPL", "TSLA"]), &sample, Utc::now()).await;

        assert_eq!(stats.errors, 2);
        match outcome {
            FetchOutcome::SampleSynthesized(rows) => {
                assert_eq!(rows.len(), 8);
                assert!(rows.iter().all(EnrichedRow::is_synthetic));
            }
            FetchOutcome::Fetched(_) => panic!("expected synthesized sample rows"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_between_symbols() {
        let provider = stub(vec![("AAPL", candles("AAPL", 1)), ("TSLA", candles("TSLA", 1))]);
        let mut config = finnhub(&["AAPL", "TSLA"]);
        config.request_delay_ms = 1000;
        let sample = SampleConfig { days_per_symbol: 1 };

        let before = tokio::time::Instant::now();
        fetch_candles(&provider, &config, &sample, Utc::now()).await;

        assert!(before.elapsed() >= std::time::Duration::from_secs(2));
    }
}
