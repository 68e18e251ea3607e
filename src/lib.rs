//! Retrieve the Atlassian IP Ranges and extract the CIDR blocks that must be allow-listed for
//! inbound traffic from Atlassian cloud products.
//!
//! ```no_run
//! let ip_ranges = atlassianipranges::get_ranges()?;
//!
//! println!("Sync Token: {}", ip_ranges.id());
//! for cidr in ip_ranges.all_cidr_blocks() {
//!     println!("{cidr}");
//! }
//! # Ok::<(), atlassianipranges::Error>(())
//! ```

/*-------------------------------------------------------------------------------------------------
  Library Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::address_family::AddressFamily;
pub use crate::core::client::{fetch, get_ranges, Client, ClientBuilder};
pub use crate::core::data_source::{
    read_ip_ranges, Diagnostic, IpRangesData, DATA_SOURCE_NAME, PROVIDER_ADDRESS,
    SCHEMA_ATTRIBUTES,
};
pub use crate::core::errors::{Error, Result};
pub use crate::core::filter::{Filter, FilterBuilder, DEFAULT_DIRECTIONS, DEFAULT_PRODUCTS};
pub use crate::core::ip_ranges::{flatten, CidrBlocks, IpRanges};
pub use crate::core::json::{RangeDocument, RangeRecord};

// Re-export the ipnetwork crate used to work with the published CIDR blocks
pub use ipnetwork;
