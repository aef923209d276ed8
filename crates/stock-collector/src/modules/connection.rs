//! Elasticsearch 접속 후보 확인 모듈.
//!
//! 후보를 순서대로 한 번씩 시도합니다:
//! 1. `GET /` (클러스터 정보) 성공 → 채택
//! 2. 인증/권한 오류면 인덱스 존재 확인(`HEAD /test`)으로 재확인 → 성공 시 제한 모드로 채택
//! 3. 그 외 실패 → 다음 후보

use stock_data::{DataError, ElasticClient, EndpointConfig};

use crate::config::ElasticsearchConfig;
use crate::error::CollectorError;
use crate::Result;

/// 권한이 제한된 계정에서 사용할 존재 확인용 인덱스
const PROBE_INDEX: &str = "test";

/// 접속 모드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionMode {
    /// 클러스터 정보 조회 가능
    Full {
        /// Elasticsearch 버전
        version: String,
    },
    /// 클러스터 정보는 권한 부족, 인덱스 작업만 확인됨
    Limited,
}

/// 채택된 접속
pub struct ResolvedConnection {
    pub client: ElasticClient,
    pub mode: ConnectionMode,
    /// 몇 번째 후보인지 (1부터)
    pub attempt: usize,
}

/// 후보 목록에서 사용 가능한 첫 번째 클라이언트를 반환합니다.
pub async fn resolve_connection(candidates: &[EndpointConfig]) -> Result<ResolvedConnection> {
    for (idx, endpoint) in candidates.iter().enumerate() {
        let attempt = idx + 1;
        tracing::info!(attempt = attempt, endpoint = %endpoint.label, "Elasticsearch 접속 시도");

        match try_candidate(endpoint).await {
            Ok((client, mode)) => {
                match &mode {
                    ConnectionMode::Full { version } => tracing::info!(
                        version = %version,
                        endpoint = %endpoint.label,
                        "Elasticsearch 접속 성공"
                    ),
                    ConnectionMode::Limited => tracing::warn!(
                        endpoint = %endpoint.label,
                        "Elasticsearch 접속 성공 (권한 제한: 인덱스 작업만 가능)"
                    ),
                }
                return Ok(ResolvedConnection {
                    client,
                    mode,
                    attempt,
                });
            }
            Err(e) => {
                tracing::error!(
                    attempt = attempt,
                    endpoint = %endpoint.label,
                    error = %truncate(&e.to_string(), 100),
                    "접속 실패"
                );
            }
        }
    }

    Err(CollectorError::ConnectionUnavailable {
        attempts: candidates.len(),
    })
}

async fn try_candidate(
    endpoint: &EndpointConfig,
) -> std::result::Result<(ElasticClient, ConnectionMode), DataError> {
    let client = ElasticClient::connect(endpoint)?;

    match client.info().await {
        Ok(info) => Ok((
            client,
            ConnectionMode::Full {
                version: info.version.number,
            },
        )),
        Err(e) if e.is_unauthorized() => {
            tracing::warn!(
                endpoint = %endpoint.label,
                "클러스터 정보 권한 없음, 인덱스 작업으로 재확인"
            );
            client.index_exists(PROBE_INDEX).await?;
            Ok((client, ConnectionMode::Limited))
        }
        Err(e) => Err(e),
    }
}

/// 모든 접속이 실패했을 때 설정 점검 안내를 출력합니다.
pub fn log_connection_guidance(config: &ElasticsearchConfig) {
    tracing::error!("모든 Elasticsearch 접속 시도가 실패했습니다");
    tracing::error!("해결 방법:");
    tracing::error!(
        "1. 로컬 Elasticsearch: {}에서 실행 중인지 확인하세요",
        config.fallback_host
    );
    tracing::error!("2. Elasticsearch Cloud: 엔드포인트와 자격증명, 사용자 역할(role) 할당을 확인하거나 'elastic' 슈퍼유저를 사용하세요");
    tracing::error!("3. 네트워크 연결과 방화벽 설정을 확인하세요");
    tracing::error!(
        host = config.host.as_deref().unwrap_or("Not set"),
        username = config.username.as_deref().unwrap_or("Not set"),
        password = "[HIDDEN]",
        "현재 설정"
    );

    if let Some(username) = config.username.as_deref().filter(|u| *u != "elastic") {
        tracing::warn!(
            username = username,
            "사용자에게 역할이 할당되지 않았을 수 있습니다. \
            .env에서 ELASTICSEARCH_USERNAME=elastic, ELASTICSEARCH_PASSWORD=<elastic 사용자 비밀번호>로 변경해 보세요"
        );
    }
}

fn truncate(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        message.to_string()
    } else {
        let head: String = message.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
