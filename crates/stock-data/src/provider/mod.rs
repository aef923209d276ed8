//! 데이터 Provider 모듈.
//!
//! ## Finnhub
//! - `FinnhubClient`: `/stock/candle` 일봉 조회 (API 키 필요)
//!
//! ## 샘플 데이터
//! - `generate_sample_rows`: 모든 수집이 실패했을 때 파이프라인을
//!   실행 가능하게 하는 임의의 행 생성

pub mod finnhub;
pub mod sample;

use async_trait::async_trait;
use stock_core::CandleRow;

use crate::Result;

pub use finnhub::FinnhubClient;
pub use sample::generate_sample_rows;

/// 일봉 캔들 Provider trait.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// `[from, to]` 구간(epoch 초)의 일봉 캔들을 조회합니다.
    ///
    /// 정상 응답이지만 데이터가 없으면 빈 벡터를 반환합니다.
    async fn fetch_daily_candles(&self, symbol: &str, from: i64, to: i64)
        -> Result<Vec<CandleRow>>;
}
