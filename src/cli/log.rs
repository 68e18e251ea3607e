use crate::cli::Args;
use atlassianipranges::{AddressFamily, IpRanges};
use log::{info, warn, LevelFilter};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Initialize Logging
--------------------------------------------------------------------------------------*/

/// Log to stderr at the requested verbosity; `--debug` raises the level to at least `debug`.
pub fn init(args: &Args) {
    let level = match args.verbose.log_level_filter() {
        level if args.debug && level < LevelFilter::Debug => LevelFilter::Debug,
        level => level,
    };

    stderrlog::new()
        .module("atlassianipranges")
        .verbosity(level)
        .init()
        .unwrap_or_else(|error| eprintln!("Failed to initialize logging: {error}"));
}

/*--------------------------------------------------------------------------------------
  Filter Results
--------------------------------------------------------------------------------------*/

pub fn filter_results(ip_ranges: &IpRanges) {
    let cidr_blocks = ip_ranges.cidr_blocks();

    info!(
        "Found {} CIDR block(s) in IP ranges snapshot {}: {} IPv4, {} IPv6",
        cidr_blocks.all.len(),
        ip_ranges.id(),
        cidr_blocks.ipv4.len(),
        cidr_blocks.ipv6.len()
    );

    let unclassified = cidr_blocks
        .all
        .iter()
        .filter(|cidr| cidr_blocks.family(cidr) == AddressFamily::Unparseable)
        .count();
    if unclassified > 0 {
        warn!("{unclassified} CIDR block(s) have an unparseable network address");
    }

    if cidr_blocks.is_empty() {
        warn!("No IP ranges matched the filter");
    }
}
