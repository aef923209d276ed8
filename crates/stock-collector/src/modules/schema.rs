//! 인덱스 매핑 초기화 모듈.

use stock_data::{index_mapping, ElasticClient};

/// 인덱스 초기화 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    /// 이미 존재 (변경 없음)
    AlreadyExists,
    /// 새로 생성
    Created,
    /// 확인/생성 실패 (기존 인덱스를 사용한다고 가정하고 계속 진행)
    Warning(String),
}

/// 인덱스가 없으면 매핑과 함께 생성합니다.
///
/// 실패해도 작업을 중단하지 않습니다.
pub async fn ensure_index(client: &ElasticClient, index: &str) -> SchemaStatus {
    let result = match client.index_exists(index).await {
        Ok(true) => Ok(SchemaStatus::AlreadyExists),
        Ok(false) => client
            .create_index(index, &index_mapping())
            .await
            .map(|_| SchemaStatus::Created),
        Err(e) => Err(e),
    };

    match result {
        Ok(SchemaStatus::AlreadyExists) => {
            tracing::info!(index = index, "인덱스가 이미 존재합니다");
            SchemaStatus::AlreadyExists
        }
        Ok(status) => {
            tracing::info!(index = index, "인덱스 생성 완료");
            status
        }
        Err(e) => {
            tracing::warn!(index = index, error = %e, "인덱스 생성 경고, 기존 인덱스로 계속 진행");
            SchemaStatus::Warning(e.to_string())
        }
    }
}
