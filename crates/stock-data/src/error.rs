//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 수집/저장 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 전송 계층 오류 (연결 실패, 타임아웃 등)
    #[error("Request error: {0}")]
    Request(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// 인증/권한 오류 (401, 403)
    #[error("Unauthorized (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    /// API가 정상 상태가 아닌 응답을 반환
    #[error("API status: {0}")]
    ApiStatus(String),

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// HTTP 상태 코드로부터 오류를 생성합니다.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let status = status.as_u16();
        match status {
            401 | 403 => Self::Unauthorized { status, body },
            _ => Self::Http { status, body },
        }
    }

    /// 인증/권한 계열 오류인지 확인합니다.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::Parse(err.to_string())
        } else {
            DataError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
