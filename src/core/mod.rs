/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod address_family;
pub mod client;
pub mod data_source;
pub mod datetime;
pub mod errors;
pub mod filter;
pub mod ip_ranges;
pub mod json;
