use crate::core::address_family::AddressFamily;
use crate::core::filter::Filter;
use crate::core::json::{RangeDocument, RangeRecord};
use chrono::{DateTime, Utc};
use log::{debug, trace};
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Flatten IP Range Records
-------------------------------------------------------------------------------------------------*/

/// Apply the `filter` to each record and collect the CIDRs of the included records into the
/// IPv4, IPv6, and combined CIDR block sets.
///
/// A record whose `network` is not a valid IP address still contributes its CIDR to the
/// combined set, but to neither address-family set.
///
/// ```rust
/// use atlassianipranges::{flatten, Filter, RangeRecord};
///
/// let records = vec![RangeRecord {
///     network: "13.52.5.0".to_string(),
///     cidr: "13.52.5.0/24".to_string(),
///     directions: vec!["ingress".to_string()],
///     products: vec!["jira".to_string()],
///     ..RangeRecord::default()
/// }];
///
/// let cidr_blocks = flatten(&records, &Filter::default());
/// assert!(cidr_blocks.ipv4.contains("13.52.5.0/24"));
/// assert!(cidr_blocks.ipv6.is_empty());
/// ```
pub fn flatten(records: &[RangeRecord], filter: &Filter) -> CidrBlocks {
    let mut cidr_blocks = CidrBlocks::default();

    for record in records {
        trace!("IP range record: {:?}", record);
        if !filter.include_record(record) {
            continue;
        }
        cidr_blocks.insert(AddressFamily::classify(&record.network), &record.cidr);
    }

    cidr_blocks
}

/*-------------------------------------------------------------------------------------------------
  CIDR Blocks
-------------------------------------------------------------------------------------------------*/

/// Deduplicated CIDR blocks, segmented by address family.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CidrBlocks {
    /// CIDRs of included records with an IPv4 network address.
    pub ipv4: BTreeSet<String>,

    /// CIDRs of included records with an IPv6 network address.
    pub ipv6: BTreeSet<String>,

    /// CIDRs of all included records, regardless of address family.
    pub all: BTreeSet<String>,
}

impl CidrBlocks {
    fn insert(&mut self, family: AddressFamily, cidr: &str) {
        self.all.insert(cidr.to_string());

        match family {
            AddressFamily::IPv4 => {
                self.ipv4.insert(cidr.to_string());
            }
            AddressFamily::IPv6 => {
                self.ipv6.insert(cidr.to_string());
            }
            AddressFamily::Unparseable => {
                debug!("Unparseable network address for {cidr}; included in the combined set only")
            }
        }
    }

    /// Address family a CIDR in the combined set was classified under.
    pub fn family(&self, cidr: &str) -> AddressFamily {
        if self.ipv4.contains(cidr) {
            AddressFamily::IPv4
        } else if self.ipv6.contains(cidr) {
            AddressFamily::IPv6
        } else {
            AddressFamily::Unparseable
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/*-------------------------------------------------------------------------------------------------
  IP Ranges
-------------------------------------------------------------------------------------------------*/

/// The filtered Atlassian IP Ranges for one snapshot of the published document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IpRanges {
    pub(crate) sync_token: i64,
    pub(crate) creation_date: Option<DateTime<Utc>>,
    pub(crate) cidr_blocks: CidrBlocks,
}

impl IpRanges {
    /// Flatten a decoded document with the provided filter.
    pub fn from_document(document: &RangeDocument, filter: &Filter) -> IpRanges {
        IpRanges {
            sync_token: document.sync_token,
            creation_date: document.creation_date,
            cidr_blocks: flatten(&document.items, filter),
        }
    }

    /// The "sync token" identifies the published snapshot the ranges were taken from.
    pub fn sync_token(&self) -> i64 {
        self.sync_token
    }

    /// Identifier for this result: the decimal sync token. Results from the same snapshot share
    /// an identifier regardless of the filter applied.
    pub fn id(&self) -> String {
        self.sync_token.to_string()
    }

    pub fn creation_date(&self) -> Option<&DateTime<Utc>> {
        self.creation_date.as_ref()
    }

    pub fn cidr_blocks(&self) -> &CidrBlocks {
        &self.cidr_blocks
    }

    pub fn ipv4_cidr_blocks(&self) -> &BTreeSet<String> {
        &self.cidr_blocks.ipv4
    }

    pub fn ipv6_cidr_blocks(&self) -> &BTreeSet<String> {
        &self.cidr_blocks.ipv6
    }

    pub fn all_cidr_blocks(&self) -> &BTreeSet<String> {
        &self.cidr_blocks.all
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
