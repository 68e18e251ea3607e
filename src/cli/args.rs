use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Query the Atlassian IP ranges.", long_about = None)]
pub struct Args {
    /// Include IPv4 CIDR blocks
    #[arg(short = '4', long)]
    pub ipv4: bool,

    /// Include IPv6 CIDR blocks
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Include ranges that apply to these traffic directions [default: ingress]
    #[arg(short = 'd', long = "direction")]
    pub directions: Option<Vec<String>>,

    /// Include ranges that apply to these products [default: confluence jira]
    #[arg(short = 'p', long = "product")]
    pub products: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Include a summary of the matching CIDR blocks
    #[arg(long)]
    pub summary: bool,

    /// Save the results to a CSV file
    #[arg(long = "csv")]
    pub csv_file: Option<PathBuf>,

    /// Log the raw and decoded IP ranges documents
    #[arg(long)]
    pub debug: bool,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Table of CIDR blocks and their address families
    Table,

    /// List of (RFC4632) CIDR-format blocks
    Cidr,

    /// List of IP networks in network mask format (n.n.n.n m.m.m.m)
    Netmask,

    /// JSON data-source state (id, ipv4_cidr_blocks, ipv6_cidr_blocks, cidr_blocks)
    Json,
}
