//! 월 → 계절 매핑.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 계절 (북반구 기준).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
    /// 범위를 벗어난 월
    Unknown,
}

impl Season {
    /// 월(1~12)에 해당하는 계절을 반환합니다.
    ///
    /// 12, 1, 2월은 겨울이며 범위를 벗어난 값은 `Unknown`입니다.
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Self::Winter,
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Fall,
            _ => Self::Unknown,
        }
    }

    /// 인덱스에 저장되는 키워드 값.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
