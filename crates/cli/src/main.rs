//! ftp-to-s3 CLI - migrate one FTP directory into an S3 bucket.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use ftp_to_s3_common::{
    ANONYMOUS_PASSWORD, ANONYMOUS_USER, DEFAULT_FTP_PORT, DEFAULT_FTP_TIMEOUT_SECS,
};
use ftp_to_s3_source::FtpSettings;
use ftp_to_s3_storage::StorageSettings;
use ftp_to_s3_transfer::{
    normalize_worker_count, run_configured, TransferConfig, TransferError, TransferOptions,
    TransferProgress, TransferReport,
};
use thiserror::Error;
use tracing::{info, warn, Level};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Exit code when some files could not be transferred.
const EXIT_INCOMPLETE: u8 = 1;
/// Exit code for fatal errors.
const EXIT_FATAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "ftp-to-s3")]
#[command(about = "Copy every file in an FTP directory into an S3 bucket")]
#[command(version)]
struct Cli {
    /// FTP server host name
    #[arg(long, env = "FTP_TO_S3_HOST")]
    host: String,

    /// Destination S3 bucket
    #[arg(long, env = "FTP_TO_S3_BUCKET")]
    bucket: String,

    /// Remote directory to migrate
    #[arg(long, env = "FTP_TO_S3_SOURCE_DIR")]
    source_dir: String,

    /// Destination key prefix, prepended verbatim to each file name [default: the source directory plus "/"]
    #[arg(long, env = "FTP_TO_S3_OUTPUT_PREFIX", default_value = "")]
    output_prefix: String,

    /// Number of concurrent transfers; values below 1 run one
    #[arg(long, env = "FTP_TO_S3_NUM_THREADS", default_value_t = 1, allow_negative_numbers = true)]
    num_threads: i64,

    /// FTP control port
    #[arg(long, env = "FTP_TO_S3_FTP_PORT", default_value_t = DEFAULT_FTP_PORT)]
    ftp_port: u16,

    /// FTP login user
    #[arg(long, env = "FTP_TO_S3_FTP_USER", default_value = ANONYMOUS_USER)]
    ftp_user: String,

    /// FTP login password
    #[arg(long, env = "FTP_TO_S3_FTP_PASSWORD", default_value = ANONYMOUS_PASSWORD, hide_env_values = true)]
    ftp_password: String,

    /// FTP connect and read timeout in seconds
    #[arg(long, env = "FTP_TO_S3_FTP_TIMEOUT", default_value_t = DEFAULT_FTP_TIMEOUT_SECS)]
    ftp_timeout: u64,

    /// AWS region [default: from the AWS environment]
    #[arg(long, env = "FTP_TO_S3_REGION")]
    region: Option<String>,

    /// Custom S3 endpoint URL
    #[arg(long, env = "FTP_TO_S3_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long, env = "FTP_TO_S3_FORCE_PATH_STYLE")]
    force_path_style: bool,

    /// Account ID expected to own the bucket
    #[arg(long, env = "FTP_TO_S3_EXPECTED_BUCKET_OWNER")]
    expected_bucket_owner: Option<String>,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, env = "FTP_TO_S3_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format: text or json
    #[arg(long, env = "FTP_TO_S3_LOG_FORMAT", default_value = "text")]
    log_format: String,

    /// File that receives a copy of the log
    #[arg(long, env = "FTP_TO_S3_LOG_FILE", default_value = "file_transfer.log")]
    log_file: PathBuf,

    /// Log to stderr only
    #[arg(long)]
    no_log_file: bool,

    /// Print progress updates as JSON lines to stderr
    #[arg(long)]
    progress: bool,

    /// Output the JSON report to stdout
    #[arg(long)]
    output_json: bool,
}

impl Cli {
    /// Build the run configuration from the parsed arguments.
    fn transfer_config(&self) -> TransferConfig {
        let ftp = FtpSettings::new(self.host.as_str())
            .with_port(self.ftp_port)
            .with_credentials(self.ftp_user.as_str(), self.ftp_password.as_str())
            .with_timeout(Duration::from_secs(self.ftp_timeout));

        let mut storage = StorageSettings::new().with_force_path_style(self.force_path_style);
        if let Some(ref region) = self.region {
            storage = storage.with_region(region.as_str());
        }
        if let Some(ref url) = self.endpoint_url {
            storage = storage.with_endpoint_url(url.as_str());
        }
        if let Some(ref owner) = self.expected_bucket_owner {
            storage = storage.with_expected_bucket_owner(owner.as_str());
        }

        let options = TransferOptions::new().with_num_workers(normalize_worker_count(self.num_threads));

        TransferConfig::new(self.host.as_str(), self.bucket.as_str(), self.source_dir.as_str())
            .with_ftp(ftp)
            .with_storage(storage)
            .with_output_prefix(self.output_prefix.as_str())
            .with_options(options)
    }
}

/// Fatal CLI errors.
#[derive(Error, Debug)]
enum CliError {
    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(report) if report.is_complete() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_INCOMPLETE),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run() -> Result<TransferReport, CliError> {
    let cli = Cli::parse();

    let log_file: Option<&Path> = if cli.no_log_file {
        None
    } else {
        Some(cli.log_file.as_path())
    };
    setup_logging(&cli.log_level, &cli.log_format, log_file).map_err(CliError::Logging)?;

    if cli.num_threads < 1 {
        warn!("--num-threads {} is below 1; using 1 worker", cli.num_threads);
    }

    let config: TransferConfig = cli.transfer_config();
    info!(
        "Starting transfer of {} from {} into bucket {}",
        config.source_directory, config.ftp.host, config.bucket
    );

    let json_progress: bool = cli.progress;
    let progress = move |p: &TransferProgress| {
        info!(
            "[{} {}/{}] {} {}",
            p.wave,
            p.completed,
            p.total,
            p.source_path,
            if p.succeeded { "done" } else { "failed" }
        );
        if json_progress {
            if let Ok(line) = serde_json::to_string(p) {
                eprintln!("{}", line);
            }
        }
    };

    let report: TransferReport = run_configured(&config, Some(&progress)).await?;

    if cli.output_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(report)
}

fn print_summary(report: &TransferReport) {
    let status_msg = if report.is_complete() {
        "Transfer completed!"
    } else {
        "Transfer finished with failures."
    };
    println!("\n{}", status_msg);
    println!("  Listed: {}", report.total_listed);
    println!("  Transferred: {}", report.total_succeeded);
    println!("  Retried: {}", report.retried);
    if !report.still_failed.is_empty() {
        println!("  Failed ({}):", report.still_failed.len());
        for path in &report.still_failed {
            println!("    {}", path);
        }
    }
}

fn parse_level(verbosity: &str) -> Level {
    match verbosity.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber; library `log` records are forwarded to it.
fn setup_logging(verbosity: &str, format: &str, log_file: Option<&Path>) -> Result<(), String> {
    let level: Level = parse_level(verbosity);

    let writer: BoxMakeWriter = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;
            BoxMakeWriter::new(std::io::stderr.and(Mutex::new(file)))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer);

    let result = if format == "json" {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    result.map_err(|e| e.to_string())
}
