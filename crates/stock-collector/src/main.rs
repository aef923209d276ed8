//! Finnhub → Elasticsearch 일봉 적재 CLI.

use clap::{Parser, Subcommand};
use stock_collector::config::parse_symbols;
use stock_collector::modules::{ensure_index, log_connection_guidance, resolve_connection};
use stock_collector::{pipeline, CollectorConfig, CollectorError};
use stock_core::logging::{init_logging, LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "stock-collector")]
#[command(about = "Finnhub daily candles → Elasticsearch batch loader", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// 로그 형식 (compact, pretty, json). 미지정 시 LOG_FORMAT 환경변수
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// 전체 파이프라인 실행 (접속 → 인덱스 → 수집 → 변환 → 색인)
    Run {
        /// 특정 심볼만 수집 (쉼표로 구분, 예: "AAPL,MSFT")
        #[arg(long)]
        symbols: Option<String>,
    },

    /// Elasticsearch 접속 확인만 수행
    Check,

    /// 접속 확인 후 인덱스 매핑 생성
    InitIndex,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // 로깅 초기화 (RUST_LOG가 있으면 --log-level보다 우선)
    let mut log_config = LogConfig::from_env();
    log_config.level = format!(
        "stock_collector={0},stock_data={0},stock_core={0}",
        cli.log_level
    );
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    init_logging(log_config)?;

    tracing::info!("Stock Collector 시작");

    // 설정 로드
    let mut config = CollectorConfig::from_env()?;

    let command = cli.command.unwrap_or(Commands::Run { symbols: None });
    if let Commands::Run {
        symbols: Some(ref raw),
    } = command
    {
        let symbols = parse_symbols(raw);
        if symbols.is_empty() {
            return Err(CollectorError::Config(format!("잘못된 심볼 목록: {:?}", raw)).into());
        }
        config.finnhub.symbols = symbols;
    }
    config.log_summary();

    let result = match command {
        Commands::Run { .. } => pipeline::run(&config).await.map(|report| {
            tracing::info!(
                stage = ?report.stage,
                endpoint = %report.endpoint,
                documents = report.rows.len(),
                "=== 파이프라인 완료 ==="
            );
        }),
        Commands::Check => resolve_connection(&config.elasticsearch.candidates())
            .await
            .map(|conn| {
                tracing::info!(
                    endpoint = %conn.client.label(),
                    address = %conn.client.base_url(),
                    mode = ?conn.mode,
                    "접속 확인 완료"
                );
            }),
        Commands::InitIndex => match resolve_connection(&config.elasticsearch.candidates()).await {
            Ok(conn) => {
                let status = ensure_index(&conn.client, &config.elasticsearch.index_name).await;
                tracing::info!(status = ?status, "인덱스 초기화 완료");
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => {
            tracing::info!("Stock Collector 종료");
            Ok(())
        }
        Err(CollectorError::ConnectionUnavailable { .. }) => {
            log_connection_guidance(&config.elasticsearch);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
