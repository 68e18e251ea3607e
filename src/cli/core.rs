use crate::cli;
use atlassianipranges::{FilterBuilder, IpRanges};
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build IP Ranges filter from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn build_filter(args: &cli::Args) -> atlassianipranges::Filter {
    let mut builder = FilterBuilder::new();

    if let Some(directions) = &args.directions {
        builder = builder.directions(directions.iter().map(|direction| direction.to_lowercase()));
    }

    if let Some(products) = &args.products {
        builder = builder.products(products.iter().map(|product| product.to_lowercase()));
    }

    builder.build()
}

/*--------------------------------------------------------------------------------------
  Select the CIDR blocks to display from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn select_cidr_blocks<'r>(args: &cli::Args, ip_ranges: &'r IpRanges) -> &'r BTreeSet<String> {
    match (args.ipv4, args.ipv6) {
        (true, false) => ip_ranges.ipv4_cidr_blocks(),
        (false, true) => ip_ranges.ipv6_cidr_blocks(),
        _ => ip_ranges.all_cidr_blocks(),
    }
}
