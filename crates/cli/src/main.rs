mod commands;
mod logging;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::ApiOptions;
use logging::{LogLevel, LogOptions};
use render::DiagramLayout;
use std::path::PathBuf;
use tracing::{error, info};

/// Pull data models out of a metadata catalogue and draw them.
#[derive(Parser)]
#[command(name = "catalogue", version)]
struct Cli {
    /// File log level. Overridden by --verbose.
    #[arg(short = 'l', long, value_enum, ignore_case = true, default_value = "INFO", global = true)]
    log_level: LogLevel,

    /// File log at DEBUG, and INFO to stdout.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Directory for log files.
    #[arg(short = 'p', long, default_value = "logs/", global = true)]
    log_path: PathBuf,

    /// Write the file log as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a model to a JSON file.
    Extract {
        #[command(flatten)]
        api: ApiArgs,

        /// UUID of the model to extract.
        #[arg(short = 'i', long)]
        model_id: String,

        #[arg(short = 'o', long, default_value = "output.json")]
        output_file: PathBuf,
    },
    /// Turn an extracted JSON file into a draw.io entity diagram.
    Render {
        #[arg(short = 'i', long)]
        input_file: PathBuf,

        #[arg(short = 'o', long, default_value = "new_model.xml")]
        output_file: PathBuf,

        /// Classes per diagram row.
        #[arg(long, default_value_t = DiagramLayout::default().columns)]
        columns: usize,
    },
    /// Resolve a path such as `dm:Model|dc:Class` to its id-based URL.
    Resolve {
        #[command(flatten)]
        api: ApiArgs,

        path: String,
    },
    /// Set the description of the item a path names.
    Describe {
        #[command(flatten)]
        api: ApiArgs,

        path: String,

        description: String,
    },
}

#[derive(Args)]
struct ApiArgs {
    /// Catalogue API base, e.g. http://localhost:8082/api. Falls back to CATALOGUE_URL.
    #[arg(short = 'u', long)]
    catalogue_url: Option<String>,

    /// API key (a UUID). Falls back to CATALOGUE_API_KEY.
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Retries for failed connections. HTTP errors are never retried.
    #[arg(long)]
    retries: Option<usize>,
}

impl From<ApiArgs> for ApiOptions {
    fn from(args: ApiArgs) -> Self {
        Self {
            url: args.catalogue_url,
            api_key: args.api_key,
            timeout_secs: args.timeout_secs,
            retries: args.retries,
        }
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Extract { .. } => "extract",
            Command::Render { .. } => "render",
            Command::Resolve { .. } => "resolve",
            Command::Describe { .. } => "describe",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_options = LogOptions {
        level: cli.log_level,
        verbose: cli.verbose,
        log_path: cli.log_path,
        json: cli.json_logs,
    };
    let log_file = logging::init(&log_options, cli.command.name())?;

    info!(log_file = %log_file.display(), "Execution begins");
    let result = run(cli.command).await;

    if let Err(e) = &result {
        error!(error = ?e, "Execution failed");
    }
    info!("Execution ends");
    result
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Extract {
            api,
            model_id,
            output_file,
        } => {
            let client = ApiOptions::from(api).connect()?;
            commands::extract_model(client, &model_id, &output_file).await
        }
        Command::Render {
            input_file,
            output_file,
            columns,
        } => {
            let layout = DiagramLayout {
                columns,
                ..DiagramLayout::default()
            };
            commands::render_model(&input_file, &output_file, &layout).await
        }
        Command::Resolve { api, path } => {
            let client = ApiOptions::from(api).connect()?;
            let resolved = commands::resolve_path(client, &path).await?;
            println!("{}", serde_json::to_string_pretty(&resolved)?);
            Ok(())
        }
        Command::Describe {
            api,
            path,
            description,
        } => {
            let client = ApiOptions::from(api).connect()?;
            let response = commands::describe_path(client, &path, &description).await?;
            println!("{} {}", response.status_code, response.reason);
            Ok(())
        }
    }
}
