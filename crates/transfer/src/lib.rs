//! Concurrent FTP to S3 transfer orchestration.
//!
//! The orchestrator lists one remote directory, transfers every entry through
//! a bounded worker pool, retries the failures exactly once, and returns a
//! `TransferReport`. Individual file failures never abort a run; only a
//! failure to obtain the listing does.
//!
//! # Example
//!
//! ```ignore
//! use ftp_to_s3_transfer::run_transfer;
//!
//! let report = run_transfer("ftp.example.com", "my-bucket", "/pub/data", "", 4).await?;
//! println!("{} of {} transferred", report.total_succeeded, report.total_listed);
//! ```

mod counter;
mod error;
mod orchestrator;
mod runner;
mod types;
mod unit;

pub use counter::SuccessCounter;
pub use error::TransferError;
pub use orchestrator::{normalize_worker_count, TransferOptions, TransferOrchestrator};
pub use runner::{run_configured, run_transfer, TransferConfig};
pub use types::{TransferJob, TransferOutcome, TransferProgress, TransferReport, Wave};
pub use unit::TransferUnit;
