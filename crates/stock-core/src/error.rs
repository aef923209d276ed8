//! 핵심 에러 타입.

use thiserror::Error;

/// 도메인 변환 에러.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// 필수 필드 누락 (문서 생성 불가)
    #[error("필수 필드 누락: {0}")]
    MissingField(&'static str),
}

/// 핵심 작업을 위한 Result 타입 별칭.
pub type CoreResult<T> = Result<T, CoreError>;
