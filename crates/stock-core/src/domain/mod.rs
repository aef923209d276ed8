//! 도메인 모델.
//!
//! - `CandleRow` - API에서 수집한 일봉 원본 행
//! - `EnrichedRow` - 파생 컬럼이 추가된 행
//! - `IndexDocument` - 검색 인덱스에 저장되는 문서
//! - `Season`, `Sentiment` - 키워드 필드 값

pub mod candle;
pub mod document;
pub mod season;

pub use candle::{CandleRow, EnrichedRow, RowSource, Sentiment};
pub use document::IndexDocument;
pub use season::Season;
