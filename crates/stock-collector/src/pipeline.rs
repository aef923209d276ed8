//! 전체 파이프라인 실행.
//!
//! 접속 확인 → 인덱스 초기화 → 수집 → 변환 → 색인 순서로 한 번씩만 실행합니다.
//!
//! ```text
//! Unconnected → Connected → SchemaReady → DataFetched | SampleSynthesized
//!             → Transformed → Loaded | LoadFailed
//! ```

use chrono::Utc;
use secrecy::ExposeSecret;
use stock_core::{transform, EnrichedRow};
use stock_data::{CandleProvider, FinnhubClient};

use crate::modules::{
    ensure_index, fetch_candles, load_documents, log_preview, resolve_connection, DataSummary,
    FetchOutcome, LoadOutcome, SchemaStatus,
};
use crate::{CollectionStats, CollectorConfig, Result};

/// 미리보기로 출력할 행 수
const PREVIEW_ROWS: usize = 5;

/// 파이프라인 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Unconnected,
    Connected,
    SchemaReady,
    DataFetched,
    SampleSynthesized,
    Transformed,
    Loaded,
    LoadFailed,
}

/// 파이프라인 실행 결과
#[derive(Debug)]
pub struct PipelineReport {
    /// 최종 단계
    pub stage: PipelineStage,
    /// 채택된 Elasticsearch 후보
    pub endpoint: String,
    /// 인덱스 초기화 결과
    pub schema: SchemaStatus,
    /// 심볼별 수집 통계
    pub fetch_stats: CollectionStats,
    /// 변환 후 남은 행
    pub rows: Vec<EnrichedRow>,
    /// 색인 결과
    pub load: LoadOutcome,
    /// 최종 요약
    pub summary: DataSummary,
}

/// Finnhub Provider로 전체 파이프라인을 실행합니다.
pub async fn run(config: &CollectorConfig) -> Result<PipelineReport> {
    let provider = FinnhubClient::new(
        config.finnhub.api_key.expose_secret(),
        config.finnhub.base_url.clone(),
        config.finnhub.timeout(),
    )?;

    run_with_provider(config, &provider).await
}

/// 주어진 Provider로 전체 파이프라인을 실행합니다.
///
/// 모든 접속 후보가 실패하면 수집 전에 `ConnectionUnavailable`을 반환합니다.
pub async fn run_with_provider(
    config: &CollectorConfig,
    provider: &dyn CandleProvider,
) -> Result<PipelineReport> {
    let mut stage = PipelineStage::Unconnected;

    // 1. 접속
    let candidates = config.elasticsearch.candidates();
    let connection = resolve_connection(&candidates).await?;
    advance(&mut stage, PipelineStage::Connected);

    // 2. 인덱스 초기화
    let index = config.elasticsearch.index_name.as_str();
    let schema = ensure_index(&connection.client, index).await;
    advance(&mut stage, PipelineStage::SchemaReady);

    // 3. 수집
    let (outcome, fetch_stats) =
        fetch_candles(provider, &config.finnhub, &config.sample, Utc::now()).await;
    fetch_stats.log_summary("일봉 수집");
    tracing::info!(rows = outcome.len(), synthetic = outcome.is_synthetic(), "행 로드 완료");
    advance(
        &mut stage,
        if outcome.is_synthetic() {
            PipelineStage::SampleSynthesized
        } else {
            PipelineStage::DataFetched
        },
    );

    // 4. 변환
    let rows = match outcome {
        FetchOutcome::Fetched(candles) => transform::transform(candles),
        FetchOutcome::SampleSynthesized(rows) => transform::finalize(rows),
    };
    tracing::info!(rows = rows.len(), "변환 완료");
    log_preview(&rows, PREVIEW_ROWS);
    advance(&mut stage, PipelineStage::Transformed);

    // 5. 색인
    let load = load_documents(&connection.client, index, &rows).await;
    advance(
        &mut stage,
        match load {
            LoadOutcome::Loaded { .. } => PipelineStage::Loaded,
            _ => PipelineStage::LoadFailed,
        },
    );

    let summary = DataSummary::from_rows(&rows);
    summary.log();
    log_preview(&rows, PREVIEW_ROWS);

    Ok(PipelineReport {
        stage,
        endpoint: connection.client.label().to_string(),
        schema,
        fetch_stats,
        rows,
        load,
        summary,
    })
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    tracing::debug!(from = ?stage, to = ?next, "파이프라인 단계 전환");
    *stage = next;
}

