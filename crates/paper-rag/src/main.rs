//! Paper discovery UI - Entry Point
//!
//! Loads both models, then serves the pipeline in a browser or on the terminal.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_rag::config::{self, Config};
use paper_rag::inference::{DistilBertQa, Embedder, FastEmbedder, QaModelFiles};
use paper_rag::{ArxivClient, RagPipeline, UiServer};

#[derive(Parser, Debug)]
#[command(name = "paper-rag")]
#[command(about = "Discover arXiv papers with extractive QA and relevance scoring")]
#[command(version)]
struct Cli {
    /// Frontend: web or terminal
    #[arg(long, default_value = "web")]
    frontend: Frontend,

    /// Address to bind the web UI to
    #[arg(long, default_value = config::ui::DEFAULT_HOST, env = "HOST")]
    host: std::net::IpAddr,

    /// Web UI port
    #[arg(long, default_value_t = config::ui::DEFAULT_PORT, env = "PORT")]
    port: u16,

    /// arXiv query endpoint
    #[arg(long, default_value = config::api::ARXIV_API_URL, env = "ARXIV_API_URL")]
    arxiv_url: String,

    /// Papers fetched per query
    #[arg(long, default_value_t = config::api::MAX_RESULTS)]
    max_results: usize,

    /// HuggingFace repository of the QA model
    #[arg(long, default_value = config::models::QA_MODEL_ID, env = "PAPER_RAG_QA_MODEL")]
    qa_model: String,

    /// Load the QA model from a local directory instead of the Hub
    #[arg(long)]
    qa_model_dir: Option<PathBuf>,

    /// Cache directory for the embedding model
    #[arg(long, env = "FASTEMBED_CACHE_DIR")]
    embedding_cache_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Frontend {
    /// Browser UI
    #[default]
    Web,
    /// One query per stdin line
    Terminal,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so the terminal frontend's stdout stays clean.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

async fn load_qa(cli: &Cli) -> anyhow::Result<DistilBertQa> {
    let qa = match &cli.qa_model_dir {
        Some(dir) => {
            let files = QaModelFiles::in_dir(dir);
            let id = dir.display().to_string();
            tokio::task::spawn_blocking(move || {
                DistilBertQa::from_files(&id, &files.config, &files.tokenizer, &files.weights)
            })
            .await??
        }
        None => DistilBertQa::from_hub(&cli.qa_model).await?,
    };
    Ok(qa)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        frontend = ?cli.frontend,
        "Starting paper-rag"
    );

    let mut config = Config::new(&cli.arxiv_url, cli.max_results)?;
    config.qa_model_id.clone_from(&cli.qa_model);
    config.embedding_cache_dir.clone_from(&cli.embedding_cache_dir);

    let client = ArxivClient::new(&config)?;
    tracing::info!(endpoint = %client.api_url(), "arXiv client ready");

    tracing::info!(qa_model = %config.qa_model_id, "Loading models");
    let load_embedder = async {
        FastEmbedder::load(config.embedding_cache_dir.clone()).await.map_err(anyhow::Error::from)
    };
    let (qa, embedder) = tokio::try_join!(load_qa(&cli), load_embedder)?;
    tracing::info!(qa_model = qa.model_id(), embedder = embedder.model_name(), "Models loaded");

    let pipeline =
        RagPipeline::new(Arc::new(client), Arc::new(qa), Arc::new(embedder), config.max_results);
    let server = UiServer::new(pipeline);

    match cli.frontend {
        Frontend::Web => {
            let addr = SocketAddr::new(cli.host, cli.port);
            tracing::info!(%addr, "Running web UI");
            server.run_http(addr).await?;
        }
        Frontend::Terminal => {
            tracing::info!("Running terminal frontend");
            server.run_terminal().await?;
        }
    }

    Ok(())
}
