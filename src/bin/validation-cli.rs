use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "validation-cli")]
#[command(about = "Client CLI for the validation service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:6000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a file on the service's storage volume
    Store {
        /// Name to store the file under
        #[arg(short, long)]
        file: String,

        /// Inline payload
        #[arg(short, long, conflicts_with = "from")]
        data: Option<String>,

        /// Read the payload from a local file
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Request a calculation for a stored file
    Calculate {
        #[arg(short, long)]
        file: String,

        /// Extra request fields as key=value (values parsed as JSON when possible)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, Value)>,
    },
    /// Check service health
    Health,
}

fn parse_param(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Store { file, data, from } => {
            let data = match (data, from) {
                (Some(data), _) => data,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => return Err("one of --data or --from is required".into()),
            };
            let res = client
                .post(format!("{}/store-file", cli.url))
                .json(&json!({ "file": file, "data": data }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Calculate { file, params } => {
            let mut body: Map<String, Value> = params.into_iter().collect();
            body.insert("file".to_string(), Value::String(file));
            let res = client
                .post(format!("{}/calculate", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    if json.get("error").is_some() {
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}
