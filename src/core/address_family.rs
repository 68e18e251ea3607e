use std::fmt;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Address Family
-------------------------------------------------------------------------------------------------*/

/// Address family of an IP range's network address.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AddressFamily {
    IPv4,
    IPv6,

    /// The network address is not a valid IP address literal.
    Unparseable,
}

impl AddressFamily {
    /// Classify a bare IP address literal. IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) have a
    /// four-byte form and classify as IPv4.
    pub fn classify(network: &str) -> AddressFamily {
        match network.parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) => AddressFamily::IPv4,
            Ok(IpAddr::V6(ipv6)) if ipv6.to_ipv4_mapped().is_some() => AddressFamily::IPv4,
            Ok(IpAddr::V6(_)) => AddressFamily::IPv6,
            Err(_) => AddressFamily::Unparseable,
        }
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self, AddressFamily::IPv4)
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self, AddressFamily::IPv6)
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::IPv4 => write!(f, "IPv4"),
            AddressFamily::IPv6 => write!(f, "IPv6"),
            AddressFamily::Unparseable => write!(f, "Unknown"),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
