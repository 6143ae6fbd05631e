//! Command Line Interface
//!
//! `image-library serve` runs the HTTP API, `image-library explore` opens the
//! terminal explore dialog, and the remaining subcommands run a single
//! gateway operation and print its JSON result.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::models::{AppState, ImageMetadata, UriResponse};
use crate::routes::create_router;
use crate::storage::{GatewayResult, StorageGateway};
use crate::tui;
use crate::tui::dialog::DownloadRequest;
use crate::utils::{init_file_logger, init_logger};

#[derive(Debug, Parser)]
#[command(name = "image-library", version, about = "Image library storage gateway and explorer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve,
    /// Explore an image's metadata in the terminal
    Explore {
        /// JSON file holding the image metadata
        metadata: PathBuf,
        /// Directory for downloaded images
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Split a storage URI into bucket and object key
    Decompose { uri: String },
    /// Issue a one hour signed read URL
    SignedUrl { uri: String },
    /// Make sure the URI's bucket exists
    EnsureContainer { uri: String },
    /// Copy an object into the team bucket
    Copy {
        source_uri: String,
        destination_key: String,
    },
    /// Download an object; prints base64 unless --out is given
    Download {
        uri: String,
        /// Save the decoded image into this directory instead
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Run the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::from_env()?;

    match cli.command {
        Command::Serve => {
            init_logger();
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Explore { metadata, out } => {
            let _guard = init_file_logger(&config.ui.log_dir)?;
            let document = load_metadata(&metadata).await?;
            let gateway = Arc::new(StorageGateway::gcs(config.storage.clone()));
            let download_dir = out.unwrap_or(config.ui.download_dir);
            tui::run(gateway, document, download_dir).await?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            init_logger();
            let gateway = StorageGateway::gcs(config.storage);
            run_gateway_command(&gateway, command).await
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config);
    let app = create_router(state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down gracefully...");
}

/// Read an image metadata record from a JSON file
pub async fn load_metadata(path: &Path) -> anyhow::Result<ImageMetadata> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid metadata in {}", path.display()))
}

async fn run_gateway_command(gateway: &StorageGateway, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Decompose { uri } => print_result(Ok(gateway.decompose_uri(&uri))),
        Command::SignedUrl { uri } => print_result(gateway.get_signed_url(&uri).await),
        Command::EnsureContainer { uri } => print_result(
            gateway
                .ensure_container_exists(&uri)
                .await
                .map(|uri| UriResponse { uri }),
        ),
        Command::Copy {
            source_uri,
            destination_key,
        } => print_result(
            gateway
                .copy_object(&source_uri, &destination_key)
                .await
                .map(|uri| UriResponse { uri }),
        ),
        Command::Download { uri, out: None } => print_result(gateway.download_object(&uri).await),
        Command::Download { uri, out: Some(dir) } => {
            let object = gateway.decompose_uri(&uri);
            let file_name = object
                .object_key
                .rsplit('/')
                .next()
                .filter(|name| !name.is_empty())
                .unwrap_or("download")
                .to_string();
            let request = DownloadRequest { uri, file_name };
            let path = tui::app::download_and_save(gateway, &request, &dir).await?;
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve | Command::Explore { .. } => {
            anyhow::bail!("not a gateway command")
        }
    }
}

/// Print the success value or the `{ error }` descriptor as JSON
fn print_result<T: Serialize>(result: GatewayResult<T>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(descriptor) => {
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_copy_command() {
        let cli = Cli::try_parse_from(["image-library", "copy", "gs://a/b.png", "img-1"]).unwrap();
        match cli.command {
            Command::Copy {
                source_uri,
                destination_key,
            } => {
                assert_eq!(source_uri, "gs://a/b.png");
                assert_eq!(destination_key, "img-1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_download_with_out_dir() {
        let cli = Cli::try_parse_from(["image-library", "download", "gs://a/b.png", "--out", "/tmp/x"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Download { out: Some(ref dir), .. } if dir == Path::new("/tmp/x")
        ));
    }

    #[test]
    fn test_copy_requires_destination_key() {
        assert!(Cli::try_parse_from(["image-library", "copy", "gs://a/b.png"]).is_err());
    }

    #[tokio::test]
    async fn test_load_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.json");
        tokio::fs::write(
            &path,
            r#"{"imageID":"img-5","imageGcsURI":"gs://lib/img-5","imageFormat":"WEBP","imageRatio":"4:3"}"#,
        )
        .await
        .unwrap();

        let metadata = load_metadata(&path).await.unwrap();
        assert_eq!(metadata.download_file_name(), "img-5.webp");
        assert_eq!(metadata.value("imageRatio"), Some(serde_json::json!("4:3")));
    }

    #[tokio::test]
    async fn test_load_metadata_rejects_missing_identity() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.json");
        tokio::fs::write(&path, r#"{"imageRatio":"4:3"}"#).await.unwrap();

        assert!(load_metadata(&path).await.is_err());
    }
}
