//! Elasticsearch REST 클라이언트.
//!
//! 파이프라인에 필요한 최소한의 API만 사용합니다:
//! - `GET /` - 클러스터 정보 (상태 확인)
//! - `HEAD /{index}` - 인덱스 존재 여부
//! - `PUT /{index}` - 매핑과 함께 인덱스 생성
//! - `POST /_bulk` - NDJSON 벌크 색인

use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Duration;

use crate::error::{DataError, Result};

/// Basic 인증 정보.
#[derive(Debug)]
pub struct BasicCredentials {
    pub username: String,
    pub password: SecretString,
}

/// 접속 후보 설정.
#[derive(Debug)]
pub struct EndpointConfig {
    /// 접속 주소 (예: https://my-cluster.es.io:443)
    pub address: String,
    /// 인증 정보 (없으면 익명 접속)
    pub credentials: Option<BasicCredentials>,
    /// TLS 인증서 검증 여부
    pub verify_tls: bool,
    /// 요청 타임아웃
    pub timeout: Duration,
    /// 로그에 표시할 이름
    pub label: String,
}

impl EndpointConfig {
    /// 로컬 Elasticsearch 기본 주소.
    pub const LOCAL_ADDRESS: &'static str = "http://localhost:9200";

    /// 로컬 Elasticsearch 폴백 후보 (인증 없음, TLS 검증 안 함).
    pub fn local_fallback(timeout: Duration) -> Self {
        Self {
            address: Self::LOCAL_ADDRESS.to_string(),
            credentials: None,
            verify_tls: false,
            timeout,
            label: "Local Elasticsearch (fallback)".to_string(),
        }
    }
}

/// `GET /` 응답.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterInfo {
    #[serde(default)]
    pub cluster_name: Option<String>,
    pub version: ClusterVersion,
}

/// 클러스터 버전 정보.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterVersion {
    pub number: String,
}

/// 벌크 색인 결과.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkSummary {
    /// 성공한 문서 수
    pub success: usize,
    /// 실패한 문서 목록
    pub failed: Vec<BulkFailure>,
}

/// 벌크 색인에 실패한 문서.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkFailure {
    /// 요청 내 문서 순번
    pub position: usize,
    pub status: u16,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Debug, Deserialize)]
struct BulkItem {
    status: u16,
    #[serde(default)]
    error: Option<Value>,
}

/// Elasticsearch 클라이언트.
pub struct ElasticClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, SecretString)>,
    label: String,
}

impl ElasticClient {
    /// 후보 설정으로 클라이언트를 생성합니다. 네트워크 요청은 하지 않습니다.
    pub fn connect(endpoint: &EndpointConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(endpoint.timeout)
            .danger_accept_invalid_certs(!endpoint.verify_tls)
            .build()
            .map_err(|e| DataError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        let credentials = endpoint.credentials.as_ref().map(|c| {
            (
                c.username.clone(),
                SecretString::from(c.password.expose_secret().to_owned()),
            )
        });

        Ok(Self {
            client,
            base_url: endpoint.address.trim_end_matches('/').to_string(),
            credentials,
            label: endpoint.label.clone(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some((username, password)) => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
            None => builder,
        }
    }

    /// 클러스터 정보를 조회합니다 (상태 확인용).
    pub async fn info(&self) -> Result<ClusterInfo> {
        let response = self.request(Method::GET, "/").send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::from_status(status, body));
        }

        Ok(response.json().await?)
    }

    /// 인덱스 존재 여부를 확인합니다.
    pub async fn index_exists(&self, index: &str) -> Result<bool> {
        let response = self.request(Method::HEAD, index).send().await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(DataError::from_status(status, String::new())),
        }
    }

    /// 매핑과 함께 인덱스를 생성합니다.
    pub async fn create_index(&self, index: &str, body: &Value) -> Result<()> {
        let response = self.request(Method::PUT, index).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::from_status(status, body));
        }

        Ok(())
    }

    /// 문서를 한 번의 `_bulk` 요청으로 색인합니다.
    ///
    /// 전송 실패나 2xx가 아닌 응답은 `Err`이며, 문서 단위 실패는
    /// `BulkSummary::failed`에 담깁니다. 문서가 없으면 요청하지 않습니다.
    pub async fn bulk_index<T: Serialize>(&self, index: &str, documents: &[T]) -> Result<BulkSummary> {
        if documents.is_empty() {
            return Ok(BulkSummary::default());
        }

        let body = bulk_body(index, documents)?;

        tracing::debug!(
            index = index,
            documents = documents.len(),
            bytes = body.len(),
            "벌크 색인 요청"
        );

        let response = self
            .request(Method::POST, "/_bulk")
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::from_status(status, body));
        }

        let parsed: BulkResponse = response.json().await?;
        Ok(summarize(parsed))
    }
}

/// NDJSON 벌크 본문 생성 (문서마다 `index` 액션 + 문서 한 줄).
fn bulk_body<T: Serialize>(index: &str, documents: &[T]) -> Result<String> {
    let action = serde_json::to_string(&json!({ "index": { "_index": index } }))?;
    let mut body = String::new();

    for doc in documents {
        let source = serde_json::to_string(doc)?;
        let _ = writeln!(body, "{}", action);
        let _ = writeln!(body, "{}", source);
    }

    Ok(body)
}

fn summarize(response: BulkResponse) -> BulkSummary {
    let mut summary = BulkSummary::default();

    for (position, item) in response.items.iter().enumerate() {
        // 항목은 {"index": {...}} 형태의 단일 키 맵
        let Some(result) = item.values().next() else {
            continue;
        };

        if result.error.is_none() && result.status < 300 {
            summary.success += 1;
        } else {
            let reason = result
                .error
                .as_ref()
                .map(|e| {
                    e.get("reason")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string())
                })
                .unwrap_or_else(|| format!("HTTP {}", result.status));

            summary.failed.push(BulkFailure {
                position,
                status: result.status,
                reason,
            });
        }
    }

    summary
}
