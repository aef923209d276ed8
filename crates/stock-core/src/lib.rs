//! # Stock Core
//!
//! 일봉 ETL 파이프라인의 핵심 도메인 타입과 변환 로직을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 캔들 행 / 파생 컬럼이 추가된 행 타입
//! - 검색 인덱스 문서 타입 (와이어 표현)
//! - 파생 컬럼 계산 (순수 함수)
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod transform;

pub use domain::*;
pub use error::*;
pub use logging::*;
