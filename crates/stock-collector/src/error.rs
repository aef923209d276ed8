//! 에러 타입 정의.

use std::fmt;

use stock_data::DataError;

/// Collector 에러 타입
#[derive(Debug)]
pub enum CollectorError {
    /// 설정 에러
    Config(String),
    /// 데이터 소스 에러 (Finnhub, Elasticsearch)
    DataSource(String),
    /// 모든 Elasticsearch 접속 후보 실패
    ConnectionUnavailable {
        /// 시도한 후보 수
        attempts: usize,
    },
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::DataSource(msg) => write!(f, "Data source error: {}", msg),
            Self::ConnectionUnavailable { attempts } => write!(
                f,
                "All Elasticsearch connection attempts failed ({} candidates)",
                attempts
            ),
        }
    }
}

impl std::error::Error for CollectorError {}

impl From<DataError> for CollectorError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Config(msg) => Self::Config(msg),
            other => Self::DataSource(other.to_string()),
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
