mod cli;

use clap::Parser;
use cli::OutputFormat;
use log::error;
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Main CLI Function
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();
    cli::log::init(&args);

    // Get and filter the Atlassian IP Ranges
    let filter = cli::build_filter(&args);
    let ip_ranges = match atlassianipranges::Client::new().get_filtered_ranges(&filter) {
        Ok(ip_ranges) => ip_ranges,
        Err(error) => {
            error!("{error}");
            return ExitCode::FAILURE;
        }
    };
    cli::log::filter_results(&ip_ranges);

    let cidr_blocks = cli::select_cidr_blocks(&args, &ip_ranges);

    // Display results
    match args.output {
        OutputFormat::Table => cli::output::cidr_table(&ip_ranges, cidr_blocks),
        OutputFormat::Cidr => cli::output::cidr_format(cidr_blocks),
        OutputFormat::Netmask => cli::output::netmask_format(cidr_blocks),
        OutputFormat::Json => {
            if let Err(error) = cli::output::json_format(&ip_ranges) {
                error!("Failed to serialize the IP ranges: {error}");
                return ExitCode::FAILURE;
            }
        }
    }

    if args.summary {
        cli::output::summary(&ip_ranges);
    }

    // Save results to CSV
    if let Some(csv_file) = &args.csv_file {
        if let Err(error) = cli::csv::save(&ip_ranges, cidr_blocks, csv_file) {
            error!("Failed to save CSV file {:?}: {}", csv_file, error);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
