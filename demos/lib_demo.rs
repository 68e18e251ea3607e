use atlassianipranges::ipnetwork::IpNetwork;
use atlassianipranges::{FilterBuilder, Result};

fn main() -> Result<()> {
    // Get the inbound IP Ranges for Confluence and Jira
    let ip_ranges = atlassianipranges::get_ranges()?;
    println!("Sync Token: {}", ip_ranges.id());
    for cidr in ip_ranges.ipv4_cidr_blocks() {
        println!("{cidr}");
    }

    // Fetch once and apply a different filter
    let document = atlassianipranges::fetch("https://ip-ranges.atlassian.com/")?;
    let filter = FilterBuilder::new()
        .directions(["egress"])
        .products(["bitbucket"])
        .build();
    let cidr_blocks = atlassianipranges::flatten(&document.items, &filter);

    // Check whether an address falls within the filtered ranges
    let address: IpNetwork = "104.192.136.10".parse().unwrap();
    let contained = cidr_blocks
        .all
        .iter()
        .filter_map(|cidr| cidr.parse::<IpNetwork>().ok())
        .any(|network| network.contains(address.ip()));
    println!("{} in Bitbucket egress ranges: {}", address.ip(), contained);

    Ok(())
}
