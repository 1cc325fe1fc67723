mod gateway;

use std::io::{self, Read};

use clap::{Args, Parser, Subcommand};
use policies::{Ack, ApiError, CreatePolicy, DocumentError, PolicyApi, PolicyKey, UpdatePolicy, check_document};
use serde_json::{Value, json};

use gateway::GatewayClient;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("cannot read policy document: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Document(#[from] DocumentError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "iamx-cli", about = "IAM-X policy backend CLI")]
struct Cli {
    #[arg(long, env = "IAMX_API_URL")]
    api_url: String,

    #[arg(long, env = "IAMX_API_STAGE", default_value = "dev")]
    stage: String,

    /// Sent verbatim as the `Authorization` header.
    #[arg(long, env = "IAMX_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Policy(PolicyCommand),
}

#[derive(Args, Debug)]
struct PolicyCommand {
    #[command(subcommand)]
    command: PolicySubcommand,
}

#[derive(Subcommand, Debug)]
enum PolicySubcommand {
    List,
    Get {
        id: String,
        #[arg(long)]
        name: String,
    },
    Create(PolicyFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: PolicyFields,
    },
    Delete {
        id: String,
        #[arg(long)]
        name: String,
    },
}

#[derive(Args, Debug)]
struct PolicyFields {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, help = "Policy document file, or - for stdin")]
    document: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.api_url, &cli.stage, cli.token)?;

    match cli.command {
        Command::Ping => run_ping(&client).await,
        Command::Policy(policy) => run_policy(&client, policy).await,
    }
}

async fn run_ping(client: &GatewayClient) -> Result<(), CliError> {
    let items = client.list().await?;
    println!("ok: {} ({} policies)", client.resource(), items.len());
    Ok(())
}

async fn run_policy(client: &GatewayClient, policy: PolicyCommand) -> Result<(), CliError> {
    match policy.command {
        PolicySubcommand::List => {
            let items = client.list().await?;
            print_json(&serde_json::to_value(items)?)
        }
        PolicySubcommand::Get { id, name } => {
            let item = client.get(&PolicyKey::new(&id, &name)).await?;
            print_json(&serde_json::to_value(item)?)
        }
        PolicySubcommand::Create(fields) => {
            let request = CreatePolicy {
                policy_document: read_document(&fields.document)?,
                policy_name: fields.name,
                policy_description: fields.description,
            };
            let ack = client.create(&request).await?;
            if let Some(created) = ack.created_policy() {
                eprintln!("created policy {} ({})", created.policy_name, created.id);
            }
            print_ack(&ack)
        }
        PolicySubcommand::Update { id, fields } => {
            let request = UpdatePolicy {
                id,
                policy_document: read_document(&fields.document)?,
                policy_name: fields.name,
                policy_description: fields.description,
            };
            print_ack(&client.update(&request).await?)
        }
        PolicySubcommand::Delete { id, name } => {
            let ack = client.delete(&PolicyKey::new(&id, &name)).await?;
            print_ack(&ack)
        }
    }
}

/// Read a document from a file or stdin and check it parses as JSON.
/// The text is sent as written.
fn read_document(source: &str) -> Result<String, CliError> {
    let text = if source == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(source)?
    };
    check_document(&text)?;
    Ok(text)
}

fn print_ack(ack: &Ack) -> Result<(), CliError> {
    print_json(&json!({ "message": ack.message, "requestId": ack.request_id }))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
