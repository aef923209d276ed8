//! 수집 통계.

use std::time::Duration;

/// 심볼별 일봉 수집 통계
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStats {
    /// 요청한 심볼 수
    pub total: usize,
    /// 행을 하나 이상 받은 심볼 수
    pub success: usize,
    /// 요청/파싱 실패 또는 비정상 상태 응답
    pub errors: usize,
    /// 정상 응답이지만 행이 없는 심볼 수
    pub empty: usize,
    /// 수집한 총 행 수
    pub total_rows: usize,
    /// 소요 시간
    pub elapsed: Duration,
}

impl CollectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 행을 받은 심볼 기록
    pub fn record_rows(&mut self, rows: usize) {
        self.total += 1;
        if rows == 0 {
            self.empty += 1;
        } else {
            self.success += 1;
            self.total_rows += rows;
        }
    }

    /// 실패한 심볼 기록
    pub fn record_error(&mut self) {
        self.total += 1;
        self.errors += 1;
    }

    /// 성공한 심볼이 하나도 없는지 여부 (샘플 데이터 생성 조건)
    pub fn nothing_fetched(&self) -> bool {
        self.success == 0
    }

    /// 성공률 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.success as f64 * 100.0 / self.total as f64
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            symbols = self.total,
            success = self.success,
            errors = self.errors,
            empty = self.empty,
            rows = self.total_rows,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 통계"
        );
    }
}
