//! 시세 데이터 수집 및 검색 인덱스 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - Finnhub 일봉 캔들 Provider
//! - API 수집 실패 시 사용할 샘플 데이터 생성기
//! - Elasticsearch REST 클라이언트 (상태 확인, 인덱스 생성, 벌크 색인)

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

pub use provider::{generate_sample_rows, CandleProvider, FinnhubClient};
pub use storage::elastic::{
    BasicCredentials, BulkFailure, BulkSummary, ClusterInfo, ElasticClient, EndpointConfig,
};
pub use storage::mapping::{index_mapping, DEFAULT_INDEX_NAME};
