//! 환경변수 기반 설정 모듈.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use stock_data::{BasicCredentials, EndpointConfig, FinnhubClient, DEFAULT_INDEX_NAME};

use crate::Result;

/// 기본 수집 대상 심볼
pub const DEFAULT_SYMBOLS: [&str; 5] = ["AAPL", "TSLA", "MSFT", "GOOGL", "AMZN"];

/// 기본 수집 시작 시각 (2024-05-01T00:00:00Z)
pub const DEFAULT_FROM_EPOCH: i64 = 1_714_521_600;

/// Collector 전체 설정
#[derive(Debug)]
pub struct CollectorConfig {
    /// Elasticsearch 설정
    pub elasticsearch: ElasticsearchConfig,
    /// Finnhub 수집 설정
    pub finnhub: FinnhubConfig,
    /// 샘플 데이터 설정
    pub sample: SampleConfig,
}

/// Elasticsearch 설정
#[derive(Debug)]
pub struct ElasticsearchConfig {
    /// 접속 주소 (ELASTICSEARCH_HOST)
    pub host: Option<String>,
    /// 사용자명
    pub username: Option<String>,
    /// 비밀번호
    pub password: Option<SecretString>,
    /// 로컬 폴백 주소
    pub fallback_host: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 대상 인덱스 이름
    pub index_name: String,
}

/// Finnhub 수집 설정
#[derive(Debug)]
pub struct FinnhubConfig {
    /// API 키
    pub api_key: SecretString,
    /// API 기본 URL
    pub base_url: String,
    /// 수집 대상 심볼
    pub symbols: Vec<String>,
    /// 수집 시작 시각 (epoch 초)
    pub from_epoch: i64,
    /// API 요청 간 딜레이 (밀리초)
    pub request_delay_ms: u64,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

/// 샘플 데이터 설정
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// 심볼당 생성할 일수
    pub days_per_symbol: usize,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("FINNHUB_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("FINNHUB_API_KEY 환경변수가 설정되지 않았습니다 (수집 실패 시 샘플 데이터 사용)");
        }

        Ok(Self {
            elasticsearch: ElasticsearchConfig {
                host: env_var_opt("ELASTICSEARCH_HOST"),
                username: env_var_opt("ELASTICSEARCH_USERNAME"),
                password: env_var_opt("ELASTICSEARCH_PASSWORD").map(SecretString::from),
                fallback_host: std::env::var("ELASTICSEARCH_FALLBACK_HOST")
                    .unwrap_or_else(|_| EndpointConfig::LOCAL_ADDRESS.to_string()),
                timeout_secs: env_var_parse("ELASTICSEARCH_TIMEOUT_SECS", 30),
                index_name: std::env::var("ELASTICSEARCH_INDEX")
                    .unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string()),
            },
            finnhub: FinnhubConfig {
                api_key: SecretString::from(api_key),
                base_url: std::env::var("FINNHUB_BASE_URL")
                    .unwrap_or_else(|_| FinnhubClient::DEFAULT_BASE_URL.to_string()),
                symbols: env_var_opt("FINNHUB_SYMBOLS")
                    .map(|s| parse_symbols(&s))
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(default_symbols),
                from_epoch: env_var_parse("FINNHUB_FROM_EPOCH", DEFAULT_FROM_EPOCH),
                request_delay_ms: env_var_parse("FINNHUB_REQUEST_DELAY_MS", 1000),
                timeout_secs: env_var_parse("FINNHUB_TIMEOUT_SECS", 30),
            },
            sample: SampleConfig {
                days_per_symbol: env_var_parse("SAMPLE_DAYS_PER_SYMBOL", 30),
            },
        })
    }

    /// 설정 요약 로그 출력 (비밀번호는 길이만 표시)
    pub fn log_summary(&self) {
        let es = &self.elasticsearch;
        tracing::info!(
            host = es.host.as_deref().unwrap_or("Not set"),
            username = es.username.as_deref().unwrap_or("Not set"),
            password = %es.masked_password(),
            index = %es.index_name,
            symbols = %self.finnhub.symbols.join(","),
            "설정 로드 완료"
        );
    }
}

impl ElasticsearchConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 접속 후보 목록 (환경변수 설정 → 로컬 폴백 순).
    ///
    /// 환경변수 후보는 주소, 사용자명, 비밀번호가 모두 있을 때만 추가되며
    /// `https://` 주소일 때만 TLS 인증서를 검증합니다.
    pub fn candidates(&self) -> Vec<EndpointConfig> {
        let mut candidates = Vec::with_capacity(2);

        if let (Some(host), Some(username), Some(password)) =
            (&self.host, &self.username, &self.password)
        {
            candidates.push(EndpointConfig {
                address: host.clone(),
                credentials: Some(BasicCredentials {
                    username: username.clone(),
                    password: SecretString::from(password.expose_secret().to_owned()),
                }),
                verify_tls: host.starts_with("https://"),
                timeout: self.timeout(),
                label: format!("Environment config ({})", host),
            });
        }

        candidates.push(EndpointConfig {
            address: self.fallback_host.clone(),
            ..EndpointConfig::local_fallback(self.timeout())
        });

        candidates
    }

    /// 비밀번호를 `*`로 가린 문자열 (미설정 시 "Not set")
    pub fn masked_password(&self) -> String {
        match &self.password {
            Some(p) => "*".repeat(p.expose_secret().chars().count()),
            None => "Not set".to_string(),
        }
    }
}

impl FinnhubConfig {
    /// API 요청 간 딜레이를 Duration으로 반환
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 기본 심볼 목록
pub fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

/// 쉼표로 구분된 심볼 파싱 (공백 제거, 대문자 변환)
pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// 환경변수 값 (비어 있으면 None)
fn env_var_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
