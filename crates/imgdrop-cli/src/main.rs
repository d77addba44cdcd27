//! imgdrop CLI: upload an image through the pipeline from the command line.
//!
//! Storage and limits come from the environment (see `ImageStoreConfig::from_env`),
//! e.g. STORAGE_BACKEND, S3_BUCKET, S3_REGION, MAX_IMAGE_BYTES.

use anyhow::Context;
use clap::{Parser, Subcommand};
use imgdrop_cli::{content_type_for_path, init_tracing, FALLBACK_CONTENT_TYPE};
use imgdrop_core::{ErrorMetadata, ImageStoreConfig, UploadError, UploadRequest};
use imgdrop_processing::{upload_image, UploadContext};
use imgdrop_storage::{create_storage, derive_storage_key, KeyLayout};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgdrop", about = "Profile image upload pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate, shrink if needed, and store an image
    Upload {
        /// Path to the image file
        file: PathBuf,
        /// Owner of the image
        #[arg(long)]
        user_id: i64,
        /// Declared content type (inferred from the file extension when omitted)
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print the storage key an upload would get, without uploading
    Key {
        #[arg(long)]
        user_id: i64,
        /// Original filename
        #[arg(long)]
        filename: Option<String>,
        #[arg(long)]
        content_type: Option<String>,
    },
}

#[derive(Serialize)]
struct ErrorOutput<'a> {
    error: &'a str,
    message: String,
    status: u16,
}

impl<'a> ErrorOutput<'a> {
    /// Sensitive errors show only their client message in production.
    fn new(err: &'a UploadError, production: bool) -> Self {
        let message = if production && err.is_sensitive() {
            err.client_message()
        } else {
            err.to_string()
        };
        Self {
            error: err.error_code(),
            message,
            status: err.http_status_code(),
        }
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            user_id,
            content_type,
        } => {
            let config = ImageStoreConfig::from_env().context("Failed to load configuration")?;
            tracing::debug!(
                backend = %config.storage_backend,
                environment = %config.environment,
                max_image_bytes = config.max_image_bytes,
                "Configuration loaded"
            );

            let storage = create_storage(&config).context("Failed to create storage backend")?;
            let ctx = UploadContext::from_config(storage, &config);

            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let content_type =
                content_type.unwrap_or_else(|| content_type_for_path(&file).to_string());
            let filename = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string());

            let request = UploadRequest::new(data, content_type, filename, user_id);
            match upload_image(request, &ctx).await {
                Ok(outcome) => print_json(&outcome)?,
                Err(err) => {
                    let output = ErrorOutput::new(&err, config.is_production());
                    eprintln!(
                        "{}",
                        serde_json::to_string_pretty(&output).context("Serialize error")?
                    );
                    std::process::exit(1);
                }
            }
        }
        Commands::Key {
            user_id,
            filename,
            content_type,
        } => {
            let config = ImageStoreConfig::from_env().context("Failed to load configuration")?;
            let layout = KeyLayout::new(config.key_namespace, config.key_purpose);

            let content_type = content_type.unwrap_or_else(|| {
                filename
                    .as_deref()
                    .map(|name| content_type_for_path(std::path::Path::new(name)))
                    .unwrap_or(FALLBACK_CONTENT_TYPE)
                    .to_string()
            });

            println!(
                "{}",
                derive_storage_key(&layout, user_id, filename.as_deref(), &content_type)
            );
        }
    }

    Ok(())
}
