//! 검색 인덱스 저장소.
//!
//! - `elastic`: Elasticsearch REST 클라이언트
//! - `mapping`: `finnhub_stocks` 인덱스 필드 매핑

pub mod elastic;
pub mod mapping;
