//! Finnhub → Elasticsearch 일봉 적재 배치 작업.
//!
//! 이 crate는 다음 단계를 순서대로 실행하는 바이너리를 제공합니다:
//! 1. Elasticsearch 접속 후보 확인
//! 2. 인덱스 매핑 생성 (없을 때만)
//! 3. 심볼별 일봉 수집 (모두 실패 시 샘플 데이터 생성)
//! 4. 파생 컬럼 계산 및 필수 필드 검증
//! 5. 벌크 색인

pub mod config;
pub mod error;
pub mod modules;
pub mod pipeline;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use pipeline::{PipelineReport, PipelineStage};
pub use stats::CollectionStats;
