use atlassianipranges::IpRanges;
use std::collections::BTreeSet;
use std::error::Error;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Save IP Ranges to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(
    ip_ranges: &IpRanges,
    cidr_blocks: &BTreeSet<String>,
    path: &PathBuf,
) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize(["CIDR", "Address Family"])?;

    // Write CIDR records
    for cidr in cidr_blocks {
        let record = (cidr, ip_ranges.cidr_blocks().family(cidr).to_string());
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}
