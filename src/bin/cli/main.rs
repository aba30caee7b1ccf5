use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "image-store-cli")]
#[command(about = "CLI for interacting with the image store server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "IMAGE_STORE_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload one or more images
    Upload {
        /// Image files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Image type: PROFILE, POST or JOB_POST
        #[arg(short = 't', long, default_value = "POST")]
        image_type: String,
        /// Storage prefix, defaults to the prefix of the image type
        #[arg(short = 'p', long)]
        image_path: Option<String>,
    },

    /// Delete a stored image
    Delete {
        /// Stored image URL or path
        image_path: String,
        /// Directory the image belongs to
        #[arg(short = 'd', long)]
        image_directory: Option<String>,
    },

    /// Show a stored image
    Get {
        /// Stored image URL or path
        #[arg(long, conflicts_with = "id")]
        path: Option<String>,
        /// Image id
        #[arg(long)]
        id: Option<String>,
    },

    /// List stored images of one type
    List {
        /// Image type: PROFILE, POST or JOB_POST
        image_type: String,
    },
}

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn print_response(response: Response) -> Result<()> {
    let status = response.status();
    let body = response.text().await.context("Failed to read response")?;

    if body.is_empty() {
        println!("{}", status);
    } else {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => println!("{}", body),
        }
    }

    if !status.is_success() {
        anyhow::bail!("Request failed with status {}", status);
    }
    Ok(())
}

async fn upload(
    client: &Client,
    base: &str,
    files: &[PathBuf],
    image_type: &str,
    image_path: Option<&str>,
) -> Result<Response> {
    let mut form = Form::new().text("imageType", image_type.to_string());
    if let Some(image_path) = image_path {
        form = form.text("imagePath", image_path.to_string());
    }

    for file in files {
        let data = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image")
            .to_string();
        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(content_type_for(file))?;
        form = form.part("files", part);
    }

    client
        .post(format!("{}/api/v1/images", base))
        .multipart(form)
        .send()
        .await
        .context("Upload request failed")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let base = cli.url.trim_end_matches('/');

    let response = match &cli.command {
        Commands::Upload {
            files,
            image_type,
            image_path,
        } => upload(&client, base, files, image_type, image_path.as_deref()).await?,
        Commands::Delete {
            image_path,
            image_directory,
        } => client
            .delete(format!("{}/api/v1/images", base))
            .json(&json!({
                "imageDirectory": image_directory,
                "imagePath": image_path,
            }))
            .send()
            .await
            .context("Delete request failed")?,
        Commands::Get { path, id } => {
            let query: Vec<(&str, &str)> = match (path, id) {
                (_, Some(id)) => vec![("imageId", id.as_str())],
                (Some(path), None) => vec![("imagePath", path.as_str())],
                (None, None) => anyhow::bail!("Either --path or --id is required"),
            };
            client
                .get(format!("{}/api/v1/images", base))
                .query(&query)
                .send()
                .await
                .context("Lookup request failed")?
        }
        Commands::List { image_type } => client
            .get(format!("{}/api/v1/images/types/{}", base, image_type))
            .send()
            .await
            .context("List request failed")?,
    };

    print_response(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("dir/b.webp")), "image/webp");
        assert_eq!(content_type_for(Path::new("notes.txt")), "application/octet-stream");
    }

    #[test]
    fn test_upload_args() {
        let cli = Cli::parse_from(["image-store-cli", "upload", "a.jpg", "b.png", "-t", "PROFILE"]);

        match cli.command {
            Commands::Upload {
                files, image_type, ..
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(image_type, "PROFILE");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
