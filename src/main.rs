//! CLI entry point for rundeck-client.
//!
//! Connection settings come from flags or their `RUNDECK_*` environment
//! fallbacks; one subcommand selects the API call.
//!
//! Exit codes:
//! - 0: success
//! - 1: runtime error (API error, parse failure, network, unreadable file)
//! - 2: argument validation error (clap handles this automatically)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rundeck_client::archive::ArchiveImportOptions;
use rundeck_client::jobs::{DupeOption, ImportJobOptions, JobFormat, UuidOption};
use rundeck_client::{ClientConfig, Protocol, RundeckClient, RundeckError};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Rundeck server hostname.
    #[arg(long, env = "RUNDECK_SERVER")]
    server: String,

    #[arg(long, env = "RUNDECK_PORT", default_value_t = rundeck_client::config::DEFAULT_PORT)]
    port: u16,

    /// `http` or `https`.
    #[arg(long, env = "RUNDECK_PROTOCOL", default_value = "http")]
    protocol: Protocol,

    #[arg(long, env = "RUNDECK_API_VERSION", default_value_t = rundeck_client::config::DEFAULT_API_VERSION)]
    api_version: u32,

    /// API token. Prefer the RUNDECK_API_TOKEN environment variable so the
    /// token stays out of process listings and shell history.
    #[arg(long, env = "RUNDECK_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Print results as JSON instead of plain lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all projects.
    Projects,

    /// List the jobs in a project.
    Jobs {
        #[arg(long)]
        project: String,
    },

    /// Import job definitions from a file.
    ImportJob {
        /// File holding the XML or YAML job batch.
        #[arg(long)]
        file: PathBuf,

        #[arg(long, value_enum, ignore_case = true, default_value_t = JobFormat::Xml)]
        format: JobFormat,

        /// What to do when a job already exists.
        #[arg(long, value_enum, ignore_case = true, default_value_t = DupeOption::Create)]
        dupe_option: DupeOption,

        /// Override the project named in the definitions.
        #[arg(long)]
        project: Option<String>,

        #[arg(long, value_enum, ignore_case = true, default_value_t = UuidOption::Preserve)]
        uuid_option: UuidOption,
    },

    /// Import a project archive (zip) into an existing project.
    ImportArchive {
        #[arg(long)]
        project: String,

        #[arg(long)]
        file: PathBuf,

        #[arg(long, value_enum, ignore_case = true, default_value_t = UuidOption::Preserve)]
        job_uuid_option: UuidOption,

        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        import_executions: bool,

        #[arg(long, action = ArgAction::Set, default_value_t = false)]
        import_config: bool,

        #[arg(long = "import-acl", action = ArgAction::Set, default_value_t = false)]
        import_acl: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Prints `value` as pretty JSON.
fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = ClientConfig::new(cli.server, cli.token)
        .with_port(cli.port)
        .with_protocol(cli.protocol)
        .with_api_version(cli.api_version);
    let client = RundeckClient::new(config).map_err(|e| e.to_string())?;
    let api = |e: RundeckError| e.to_string();

    match cli.command {
        Command::Projects => {
            let projects = client.list_projects().await.map_err(api)?;
            if cli.json {
                return print_json(&projects);
            }
            for p in &projects {
                println!("{}\t{}", p.name, p.description);
            }
        }
        Command::Jobs { project } => {
            let jobs = client.list_jobs(&project).await.map_err(api)?;
            if cli.json {
                return print_json(&jobs);
            }
            for j in &jobs {
                let group = j.group.as_deref().unwrap_or("");
                println!("{}\t{}\t{}", j.id, group, j.name);
            }
        }
        Command::ImportJob {
            file,
            format,
            dupe_option,
            project,
            uuid_option,
        } => {
            let definition = String::from_utf8(read_file(&file)?)
                .map_err(|_| format!("{} is not valid UTF-8", file.display()))?;
            let options = ImportJobOptions {
                format,
                dupe_option,
                project,
                uuid_option,
            };
            let result = client.import_job(&definition, &options).await.map_err(api)?;
            if cli.json {
                return print_json(&result);
            }
            println!(
                "succeeded: {}, failed: {}, skipped: {}",
                result.succeeded.len(),
                result.failed.len(),
                result.skipped.len()
            );
            for job in &result.failed {
                eprintln!(
                    "failed job {}: {}",
                    job.name.as_deref().unwrap_or("?"),
                    job.error.as_deref().unwrap_or("no error message")
                );
            }
            if !result.is_clean() {
                return Err("some jobs failed to import".to_string());
            }
        }
        Command::ImportArchive {
            project,
            file,
            job_uuid_option,
            import_executions,
            import_config,
            import_acl,
        } => {
            let archive = read_file(&file)?;
            let options = ArchiveImportOptions {
                job_uuid_option,
                import_executions,
                import_config,
                import_acl,
            };
            let result = client
                .import_project_archive(&project, archive, &options)
                .await
                .map_err(api)?;
            if cli.json {
                return print_json(&result);
            }
            for err in result
                .errors
                .iter()
                .chain(&result.execution_errors)
                .chain(&result.acl_errors)
            {
                eprintln!("{err}");
            }
            if !result.succeeded {
                return Err(format!("archive import into '{project}' failed"));
            }
            println!("archive imported into '{project}'");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
