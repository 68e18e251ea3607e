use crate::core::client::Client;
use crate::core::errors::Error;
use crate::core::ip_ranges::IpRanges;
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Data Source Registration
-------------------------------------------------------------------------------------------------*/

/// Registry address of the provider exposing the data source.
pub const PROVIDER_ADDRESS: &str = "w564791/collection";

/// Name of the "IP ranges" data source.
pub const DATA_SOURCE_NAME: &str = "collection_ip_ranges";

/// Computed attributes of the data source; each is a set of strings.
pub const SCHEMA_ATTRIBUTES: [&str; 3] = ["ipv4_cidr_blocks", "ipv6_cidr_blocks", "cidr_blocks"];

/*-------------------------------------------------------------------------------------------------
  Data Source State
-------------------------------------------------------------------------------------------------*/

/// State produced by a read of the "IP ranges" data source.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct IpRangesData {
    pub id: String,
    pub ipv4_cidr_blocks: BTreeSet<String>,
    pub ipv6_cidr_blocks: BTreeSet<String>,
    pub cidr_blocks: BTreeSet<String>,
}

impl From<&IpRanges> for IpRangesData {
    fn from(ip_ranges: &IpRanges) -> Self {
        IpRangesData {
            id: ip_ranges.id(),
            ipv4_cidr_blocks: ip_ranges.ipv4_cidr_blocks().clone(),
            ipv6_cidr_blocks: ip_ranges.ipv6_cidr_blocks().clone(),
            cidr_blocks: ip_ranges.all_cidr_blocks().clone(),
        }
    }
}

/// Error reported to the host when a read fails.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub summary: String,
}

impl From<Error> for Diagnostic {
    fn from(error: Error) -> Self {
        Diagnostic {
            summary: error.to_string(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Read
-------------------------------------------------------------------------------------------------*/

/// Read the "IP ranges" data source: the inbound CIDR blocks for Confluence and Jira. The
/// filter is fixed; the data source takes no arguments.
pub fn read_ip_ranges(client: &Client) -> Result<IpRangesData, Diagnostic> {
    debug!("Reading {PROVIDER_ADDRESS} data source {DATA_SOURCE_NAME}");

    let ip_ranges = client.get_ranges()?;
    Ok(IpRangesData::from(ip_ranges.as_ref()))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
