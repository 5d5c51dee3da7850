//! Command line interface: argument definitions and command dispatch.

use clap::{Args, Parser, Subcommand};

use crate::client::{Config, DEFAULT_BASE_DOMAIN, DnsClient, tool_domains};
use crate::error::{Error, Result};
use crate::provider::DEFAULT_ENDPOINT;
use crate::types::DomainRecord;

/// Manage DNS A/AAAA records under a fixed base domain on Alibaba Cloud DNS.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add records for one or more domain prefixes pointing to an IP
    Add(RecordArgs),
    /// Delete the records for one or more domain prefixes
    Delete(RecordArgs),
    /// List all records under the base domain
    List(ListArgs),
    /// Delete the records for the given prefixes, continuing on failure
    Cleanup(CleanupArgs),
}

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Alibaba Cloud Access Key ID
    #[arg(long)]
    pub access_key_id: String,

    /// Alibaba Cloud Access Key Secret
    #[arg(long)]
    pub access_key_secret: String,

    /// Base domain the record prefixes live under
    #[arg(long, default_value = DEFAULT_BASE_DOMAIN)]
    pub base_domain: String,

    /// Alidns API endpoint host
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl CommonArgs {
    fn into_config(self) -> Config {
        Config {
            access_key_id: self.access_key_id,
            access_key_secret: self.access_key_secret,
            base_domain: self.base_domain,
            endpoint: self.endpoint,
        }
    }
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// IP address the prefixes map to (IPv4 -> A, IPv6 -> AAAA)
    #[arg(long)]
    pub ip: String,

    /// Comma-separated domain prefixes
    #[arg(long, value_delimiter = ',', required_unless_present = "tool_domains")]
    pub domains: Vec<String>,

    /// Also derive prefixes for the standard tool set from --ip
    #[arg(long)]
    pub tool_domains: bool,
}

impl RecordArgs {
    /// Explicit prefixes followed by the generated tool prefixes.
    fn prefixes(&self) -> Vec<String> {
        let mut prefixes = self.domains.clone();
        if self.tool_domains {
            prefixes.extend(tool_domains(&self.ip));
        }
        prefixes
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CleanupArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Comma-separated domain prefixes to clean up
    #[arg(long, value_delimiter = ',', required = true)]
    pub domains: Vec<String>,
}

/// Dispatch the parsed command.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Add(args) => {
            let prefixes = args.prefixes();
            let client = DnsClient::new(args.common.into_config());

            let mut failed = 0;
            for prefix in &prefixes {
                if let Err(err) = client.add_record(prefix, &args.ip).await {
                    log::error!("Failed to add {prefix}: {err}");
                    failed += 1;
                }
            }
            batch_result(failed, prefixes.len())
        }
        Commands::Delete(args) => {
            let prefixes = args.prefixes();
            let client = DnsClient::new(args.common.into_config());

            let mut failed = 0;
            for prefix in &prefixes {
                if let Err(err) = client.delete_record(prefix, &args.ip).await {
                    log::error!("Failed to delete {prefix}: {err}");
                    failed += 1;
                }
            }
            batch_result(failed, prefixes.len())
        }
        Commands::List(args) => {
            let client = DnsClient::new(args.common.into_config());
            let records = client.list_records().await?;
            print!("{}", render_records(client.base_domain(), &records));
            Ok(())
        }
        Commands::Cleanup(args) => {
            let client = DnsClient::new(args.common.into_config());
            let report = client.cleanup_records(&args.domains).await;
            batch_result(report.failures.len(), args.domains.len())
        }
    }
}

/// Fold per-prefix outcomes into the command result. Any failure makes
/// the whole command fail so scripts get a non-zero exit status.
fn batch_result(failed: usize, total: usize) -> Result<()> {
    if failed == 0 {
        Ok(())
    } else {
        Err(Error::PartialFailure { failed, total })
    }
}

/// Render the record table exactly as `list` prints it.
fn render_records(base_domain: &str, records: &[DomainRecord]) -> String {
    use std::fmt::Write;

    if records.is_empty() {
        return format!("No DNS records found under {base_domain}\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "DNS Records under {base_domain}:");
    let _ = writeln!(out, "{:<40} {:<10} {:<20} {}", "Domain", "Type", "Value", "Status");
    let _ = writeln!(out, "{}", "-".repeat(84));

    for record in records {
        let full_domain = format!("{}.{base_domain}", record.rr);
        let _ = writeln!(
            out,
            "{full_domain:<40} {:<10} {:<20} {}",
            record.record_type, record.value, record.status
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Total: {} record(s)", records.len());
    out
}
