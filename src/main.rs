use aqi_archive_uploader::infrastructure::storage;
use aqi_archive_uploader::{ArchiveUploader, UploaderConfig};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Uploads AQI archives to object storage", long_about = None)]
struct Args {
    /// Local archive cache directory (overrides AQI_CACHE_DIR)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Remote archive bucket (overrides AQI_BUCKET_NAME)
    #[arg(long, global = true)]
    bucket: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload an archive from the cache directory, then prune older archives
    Upload {
        /// Archive file name inside the cache directory
        filename: String,

        /// Leave the other cached archives in place
        #[arg(long)]
        keep_cache: bool,
    },
    /// Remove every cached archive (no upload has happened in this process)
    Prune,
    /// Print the archives already present in the bucket
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aqi_archive_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = UploaderConfig::from_env();
    if let Some(cache_dir) = args.cache_dir {
        config.cache_dir = cache_dir;
    }
    if let Some(bucket) = args.bucket {
        config.bucket_name = bucket;
    }

    let storage_service = storage::setup_storage(&config).await;
    let mut uploader = ArchiveUploader::new(&config, storage_service);

    match args.command {
        Command::Upload {
            filename,
            keep_cache,
        } => {
            if keep_cache {
                uploader.upload(&filename).await?;
            } else {
                let report = uploader.upload_and_prune(&filename).await?;
                info!(
                    "🧹 Cache pruned: {} removed, {} failed",
                    report.removed.len(),
                    report.failure_count()
                );
            }
        }
        Command::Prune => {
            warn!(
                "No upload recorded in this process, removing every archive in {}",
                uploader.cache_dir().display()
            );
            let report = uploader.prune_cache().await;
            info!(
                "🧹 Cache pruned: {} removed, {} failed",
                report.removed.len(),
                report.failure_count()
            );
        }
        Command::List => {
            for name in uploader.list_remote_archives().await {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
