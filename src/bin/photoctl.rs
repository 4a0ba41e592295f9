use clap::{Parser, Subcommand};
use photo_transform_proxy::Config;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "photoctl", about = "CLI for the Photo Transform Proxy", version)]
struct Cli {
    /// Override PROXY_URL
    #[arg(global = true, long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available transformations
    Transformations {
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
    /// Upload a photo and apply a transformation
    Transform {
        /// Path to a PNG or JPEG file
        file: PathBuf,
        /// Transformation effect name (younger, older, healthier, thinner)
        #[arg(long, short)]
        transformation: String,
        /// Download the result image to this path instead of only printing the URL
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    let server = cli
        .server
        .or_else(|| std::env::var("PROXY_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:3000".to_string());
    let server = server.trim_end_matches('/').to_string();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Transformations { json } => {
            let v: Value = client
                .get(format!("{}/image/transformations", server))
                .send()
                .await?
                .json()
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&v)?);
            } else if let Some(arr) = v.get("transformations").and_then(|t| t.as_array()) {
                for item in arr {
                    let name = item.get("name").and_then(|x| x.as_str()).unwrap_or("?");
                    let effect = item.get("effect").and_then(|x| x.as_str()).unwrap_or("?");
                    let desc = item.get("description").and_then(|x| x.as_str()).unwrap_or("");
                    println!("{} ({}): {}", name, effect, desc);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&v)?);
            }
            Ok(())
        }
        Commands::Transform {
            file,
            transformation,
            out,
        } => {
            let Some(mime) = mime_for_path(&file) else {
                eprintln!("Unsupported file type: {} (expected .png, .jpg, or .jpeg)", file.display());
                std::process::exit(2);
            };
            let bytes = tokio::fs::read(&file).await?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("photo")
                .to_string();

            let form = Form::new()
                .part(
                    "image",
                    Part::bytes(bytes).file_name(filename).mime_str(mime)?,
                )
                .text("transformation", transformation);

            let response = client
                .post(format!("{}/image/transform", server))
                .multipart(form)
                .send()
                .await?;
            let status = response.status();
            let body: Value = response.json().await?;
            if !status.is_success() {
                let message = body
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("transform request failed");
                eprintln!("Error ({}): {}", status, message);
                std::process::exit(1);
            }
            let Some(url) = body.get("url").and_then(|u| u.as_str()) else {
                eprintln!("Error: response contained no URL");
                std::process::exit(1);
            };
            println!("{}", url);

            if let Some(path) = out {
                let image = client.get(url).send().await?.bytes().await?;
                tokio::fs::write(&path, &image).await?;
                println!("Saved {} ({} bytes)", path.display(), image.len());
            }
            Ok(())
        }
    }
}
