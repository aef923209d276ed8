//! 벌크 색인 모듈.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use stock_core::{EnrichedRow, IndexDocument, Season, Sentiment};
use stock_data::{BulkFailure, ElasticClient};

/// 색인 결과
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// 벌크 요청 완료 (문서 단위 실패 포함 가능)
    Loaded {
        /// 성공한 문서 수
        success: usize,
        /// 실패한 문서
        failed: Vec<BulkFailure>,
        /// 문서 변환에 실패하여 제외된 행 수
        skipped_rows: usize,
    },
    /// 벌크 요청 실패 후 폴백 문서만 색인됨
    FallbackLoaded {
        /// 원래 벌크 요청의 에러
        error: String,
    },
    /// 벌크 요청과 폴백 모두 실패
    Failed {
        error: String,
        fallback_error: String,
    },
}

impl LoadOutcome {
    /// 실제 데이터가 벌크 요청으로 전달되었는지 여부
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// 행을 문서로 변환합니다. 변환할 수 없는 행은 로그를 남기고 제외합니다.
///
/// 반환값: (문서 목록, 제외된 행 수)
pub fn build_documents(rows: &[EnrichedRow]) -> (Vec<IndexDocument>, usize) {
    let mut documents = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        match IndexDocument::try_from(row) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                skipped += 1;
                tracing::warn!(symbol = ?row.symbol(), error = %e, "행 처리 에러, 건너뜀");
            }
        }
    }

    (documents, skipped)
}

/// 벌크 요청 실패 시 연결 확인용으로 색인하는 최소 문서.
pub fn fallback_document(now: DateTime<Utc>) -> IndexDocument {
    let month = now.month();

    IndexDocument {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        symbol: "AAPL".to_string(),
        close: 150.0,
        volume: 1_000_000,
        hour: "14".to_string(),
        month: Some(month),
        season: Season::from_month(month),
        sentiment: Sentiment::Neutral,
        open: None,
        high: None,
        low: None,
        price_change: None,
        volume_change: None,
        price_per_volume: None,
        trade_date: None,
    }
}

/// 모든 행을 한 번의 벌크 요청으로 색인합니다.
///
/// 요청 자체가 실패하면 폴백 문서 하나만 한 번 더 시도하고 종료합니다.
pub async fn load_documents(client: &ElasticClient, index: &str, rows: &[EnrichedRow]) -> LoadOutcome {
    let (documents, skipped_rows) = build_documents(rows);

    tracing::info!(index = index, documents = documents.len(), "Elasticsearch 색인 시작");

    let error = match client.bulk_index(index, &documents).await {
        Ok(summary) => {
            tracing::info!(success = summary.success, "문서 색인 완료");
            if !summary.failed.is_empty() {
                tracing::warn!(failed = summary.failed.len(), "일부 문서 색인 실패");
                for failure in summary.failed.iter().take(5) {
                    tracing::debug!(
                        position = failure.position,
                        status = failure.status,
                        reason = %failure.reason,
                        "색인 실패 항목"
                    );
                }
            }
            return LoadOutcome::Loaded {
                success: summary.success,
                failed: summary.failed,
                skipped_rows,
            };
        }
        Err(e) => e.to_string(),
    };

    tracing::error!(error = %error, "Elasticsearch 색인 에러, 샘플 문서로 재시도");

    let fallback = [fallback_document(Utc::now())];
    match client.bulk_index(index, &fallback).await {
        Ok(_) => {
            tracing::info!(documents = fallback.len(), "샘플 문서 색인 완료");
            LoadOutcome::FallbackLoaded { error }
        }
        Err(e) => {
            tracing::error!(error = %e, "샘플 문서 색인도 실패했습니다");
            LoadOutcome::Failed {
                error,
                fallback_error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Matcher;
    use std::time::Duration;
    use stock_core::{transform, CandleRow};
    use stock_data::EndpointConfig;

    fn client(url: String) -> ElasticClient {
        ElasticClient::connect(&EndpointConfig {
            address: url,
            credentials: None,
            verify_tls: false,
            timeout: Duration::from_secs(2),
            label: "test".to_string(),
        })
        .unwrap()
    }

    fn rows() -> Vec<EnrichedRow> {
        let ts = Utc.timestamp_opt(1_714_521_600, 0).unwrap();
        transform::transform(vec![CandleRow::new("AAPL", ts, 100.0, 110.0, 90.0, 105.0, 1000)])
    }

    #[test]
    fn test_build_documents_skips_unconvertible_rows() {
        let mut rows = rows();
        let mut broken = rows[0].clone();
        broken.candle.symbol = None;
        rows.push(broken);

        let (docs, skipped) = build_documents(&rows);
        assert_eq!(docs.len(), 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_fallback_document_shape() {
        let now = Utc.with_ymd_and_hms(2025, 10, 17, 9, 0, 0).unwrap();
        let doc = fallback_document(now);

        assert_eq!(doc.symbol, "AAPL");
        assert_eq!(doc.close, 150.0);
        assert_eq!(doc.volume, 1_000_000);
        assert_eq!(doc.hour, "14");
        assert_eq!(doc.month, Some(10));
        assert_eq!(doc.season, Season::Fall);
        assert_eq!(doc.timestamp, "2025-10-17T09:00:00Z");
    }

    #[tokio::test]
    async fn test_load_reports_partial_failures() {
        let mut server = mockito::Server::new_async().await;
        let _server_mock = server
            .mock("POST", "/_bulk")
            .with_status(200)
            .with_body(
                r#"{"errors":true,"items":[{"index":{"status":400,"error":{"reason":"bad"}}}]}"#,
            )
            .create_async()
            .await;

        let outcome = load_documents(&client(server.url()), "finnhub_stocks", &rows()).await;

        match outcome {
            LoadOutcome::Loaded { success, failed, skipped_rows } => {
                assert_eq!(success, 0);
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].reason, "bad");
                assert_eq!(skipped_rows, 0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bulk_failure_tries_single_fallback_document() {
        let mut server = mockito::Server::new_async().await;
        let original = server
            .mock("POST", "/_bulk")
            .match_body(Matcher::Regex(r#""close":105\.0"#.to_string()))
            .with_status(500)
            .expect(1)
            .create_async()
            .await;
        let fallback = server
            .mock("POST", "/_bulk")
            .match_body(Matcher::Regex(r#""close":150\.0"#.to_string()))
            .with_status(200)
            .with_body(r#"{"errors":false,"items":[{"index":{"status":201}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let outcome = load_documents(&client(server.url()), "finnhub_stocks", &rows()).await;

        original.assert_async().await;
        fallback.assert_async().await;
        assert!(matches!(outcome, LoadOutcome::FallbackLoaded { ref error } if error.contains("500")));
    }

    #[tokio::test]
    async fn test_fallback_failure_gives_up() {
        let mut server = mockito::Server::new_async().await;
        let bulk = server
            .mock("POST", "/_bulk")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let outcome = load_documents(&client(server.url()), "finnhub_stocks", &rows()).await;

        bulk.assert_async().await;
        assert!(matches!(outcome, LoadOutcome::Failed { .. }));
        assert!(!outcome.is_loaded());
    }
}
