//! Orient HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use orient::catalog::{CatalogHandle, load_catalog};
use orient::config::Config;
use orient::embedding::{EmbedderConfig, SentenceEmbedder};
use orient::retrieval::Retriever;
use orient::scoring::ResultReducer;
use orient_server::audit::AuditLog;
use orient_server::careers::CareerPathStore;
use orient_server::gateway::{HandlerState, create_router_with_state};
use orient_server::judge::{JudgeConfig, RelevanceJudge};
use orient_server::translate::{HttpTranslator, Localizer, TranslateConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
 ██████╗ ██████╗ ██╗███████╗███╗   ██╗████████╗
██╔═══██╗██╔══██╗██║██╔════╝████╗  ██║╚══██╔══╝
██║   ██║██████╔╝██║█████╗  ██╔██╗ ██║   ██║
██║   ██║██╔══██╗██║██╔══╝  ██║╚██╗██║   ██║
╚██████╔╝██║  ██║██║███████╗██║ ╚████║   ██║
 ╚═════╝ ╚═╝  ╚═╝╚═╝╚══════╝╚═╝  ╚═══╝   ╚═╝

        RETRIEVE. WEIGH. RANK.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Orient starting"
    );

    let embedder_config = match &config.model_path {
        Some(path) => EmbedderConfig::new(path.clone()),
        None => {
            tracing::warn!("No ORIENT_MODEL_PATH configured, running embedder in stub mode");
            EmbedderConfig::stub()
        }
    };
    let embedder = SentenceEmbedder::load(embedder_config)?;

    // Catalog problems are fatal: there is no sane fallback catalog.
    let catalog = load_catalog(&config.catalog_path, &embedder)?;

    let retriever = Arc::new(Retriever::new(embedder, config.top_k));

    let judge_config = JudgeConfig::from_env();
    if judge_config.is_enabled() {
        tracing::info!(model = ?judge_config.model, "Relevance judge enabled");
    } else {
        tracing::warn!("ORIENT_JUDGE_MODEL not set, reranking disabled");
    }
    let judge = Arc::new(RelevanceJudge::from_config(judge_config));

    let translate_config = TranslateConfig::from_env();
    let localizer = Arc::new(Localizer::new(
        HttpTranslator::new(&translate_config)?,
        translate_config.native_lang.clone(),
    ));

    let audit = AuditLog::new(config.audit_log_path.clone())?;

    let careers = match &config.career_paths_path {
        Some(path) => CareerPathStore::load(path)?,
        None => CareerPathStore::empty(),
    };

    let state = HandlerState::new(
        Arc::new(CatalogHandle::new(catalog)),
        retriever,
        ResultReducer::new(),
        judge,
        localizer,
        audit,
        careers,
    );

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Orient shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("ORIENT_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
