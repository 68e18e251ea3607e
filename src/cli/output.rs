use atlassianipranges::ipnetwork::IpNetwork;
use atlassianipranges::{IpRanges, IpRangesData};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;
use log::error;
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  CIDR Table
--------------------------------------------------------------------------------------*/

pub fn cidr_table(ip_ranges: &IpRanges, cidr_blocks: &BTreeSet<String>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("CIDR Block")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Address Family")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    for cidr in cidr_blocks {
        table.add_row(vec![
            Cell::new(cidr).add_attribute(Attribute::Bold),
            Cell::new(ip_ranges.cidr_blocks().family(cidr)),
        ]);
    }

    // Right-align the CIDR Block column
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");
}

/*--------------------------------------------------------------------------------------
  Summary
--------------------------------------------------------------------------------------*/

pub fn summary(ip_ranges: &IpRanges) {
    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    summary_table.add_row(vec![
        Cell::new(ip_ranges.ipv4_cidr_blocks().len()),
        Cell::new("IPv4 CIDR Blocks"),
    ]);
    summary_table.add_row(vec![
        Cell::new(ip_ranges.ipv6_cidr_blocks().len()),
        Cell::new("IPv6 CIDR Blocks"),
    ]);
    summary_table.add_row(vec![
        Cell::new(ip_ranges.all_cidr_blocks().len()),
        Cell::new("CIDR Blocks"),
    ]);
    summary_table.add_row(vec![Cell::new(ip_ranges.id()), Cell::new("Sync Token")]);
    if let Some(creation_date) = ip_ranges.creation_date() {
        summary_table.add_row(vec![Cell::new(creation_date), Cell::new("Creation Date")]);
    }

    if let Some(column) = summary_table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  CIDR Format
--------------------------------------------------------------------------------------*/

pub fn cidr_format(cidr_blocks: &BTreeSet<String>) {
    for cidr in cidr_blocks {
        println!("{cidr}");
    }
}

/*--------------------------------------------------------------------------------------
  Netmask Format
--------------------------------------------------------------------------------------*/

pub fn netmask_format(cidr_blocks: &BTreeSet<String>) {
    for cidr in cidr_blocks {
        match cidr.parse::<IpNetwork>() {
            Ok(ip_network) => println!("{} {}", ip_network.network(), ip_network.mask()),
            Err(error) => error!("Invalid CIDR block {:?}: {}", cidr, error),
        }
    }
}

/*--------------------------------------------------------------------------------------
  JSON Data-Source State
--------------------------------------------------------------------------------------*/

pub fn json_format(ip_ranges: &IpRanges) -> serde_json::Result<()> {
    let data = IpRangesData::from(ip_ranges);
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
