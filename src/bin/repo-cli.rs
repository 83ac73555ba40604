use clap::{Args, Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "repo-cli")]
#[command(about = "Command line client for the repositories API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3333")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all repositories
    List,
    /// Create a repository
    Create(RepositoryArgs),
    /// Replace title, url and techs of a repository
    Update {
        id: String,
        #[command(flatten)]
        fields: RepositoryArgs,
    },
    /// Delete a repository
    Delete { id: String },
    /// Like a repository
    Like { id: String },
}

#[derive(Args)]
struct RepositoryArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    url: String,

    /// Comma-separated list, e.g. `rust,axum`
    #[arg(long, value_delimiter = ',')]
    techs: Vec<String>,
}

impl RepositoryArgs {
    fn to_body(&self) -> Value {
        json!({
            "title": self.title,
            "url": self.url,
            "techs": self.techs,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.server.trim_end_matches('/');

    let res = match cli.command {
        Commands::List => client.get(format!("{}/repositories", base)).send().await?,
        Commands::Create(fields) => {
            client
                .post(format!("{}/repositories", base))
                .json(&fields.to_body())
                .send()
                .await?
        }
        Commands::Update { id, fields } => {
            client
                .put(format!("{}/repositories/{}", base, id))
                .json(&fields.to_body())
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{}/repositories/{}", base, id))
                .send()
                .await?
        }
        Commands::Like { id } => {
            client
                .post(format!("{}/repositories/{}/like", base, id))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if status == StatusCode::NO_CONTENT {
        println!("Deleted");
        return Ok(());
    }

    let json: Value = res.json().await?;
    if !status.is_success() {
        let message = json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        eprintln!("Error: API returned status {}: {}", status, message);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
