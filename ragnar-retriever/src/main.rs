use anyhow::Context;
use clap::{Parser, Subcommand};
use ragnar_embed::{EmbedConfig, FastEmbedProvider};
use ragnar_retriever::{DEFAULT_TOP_K, KnowledgeBase};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Semantic retrieval over a folder of documents (PDF, DOCX, CSV).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Embedding model to use
    #[arg(long, default_value = ragnar_embed::config::DEFAULT_MODEL)]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest a folder and report what was extracted
    Ingest {
        /// Folder containing the documents
        folder: PathBuf,
    },
    /// Build an index over a folder and run a query against it
    Search {
        /// Folder containing the documents
        folder: PathBuf,
        /// The query text
        query: String,
        /// Number of documents to retrieve
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Ingest { folder } => {
            let documents = tokio::task::spawn_blocking({
                let folder = folder.clone();
                move || ragnar_ingest::ingest_directory(&folder)
            })
            .await?
            .with_context(|| format!("ingesting {}", folder.display()))?;

            for doc in &documents {
                println!("{}\t{} chars", doc.source.display(), doc.text.len());
            }
            println!("{} documents ingested", documents.len());
        }
        Commands::Search {
            folder,
            query,
            k,
            format,
        } => {
            let provider = Arc::new(
                FastEmbedProvider::create(EmbedConfig::new(&args.model))
                    .await
                    .context("loading embedding model")?,
            );
            let kb = KnowledgeBase::load(&folder, provider)
                .await
                .with_context(|| format!("building knowledge base from {}", folder.display()))?;

            let hits = kb.retrieve_hits(&query, k).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
                OutputFormat::Text => {
                    for hit in &hits {
                        let source = kb
                            .sources()
                            .get(hit.index)
                            .map(|p| p.display().to_string())
                            .unwrap_or_default();
                        println!("#{} (distance {:.4}) {}", hit.index, hit.distance, source);
                        println!("{}\n", hit.text);
                    }
                    if hits.is_empty() {
                        println!("no documents in knowledge base");
                    }
                }
            }
        }
    }

    Ok(())
}
