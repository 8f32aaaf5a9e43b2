//! IPv4 address and CIDR notation parsing.
//!
//! Addresses are plain [`Ipv4Addr`] values (a `u32` underneath), blocks are
//! [`CidrBlock`]. All mask arithmetic is done on unsigned integers wide
//! enough that a shift by 32 never wraps or sign-extends.

use crate::error::ParseError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// `/0` gives an all-zero mask, `/32` all ones. Lengths above 32 are
/// treated as 32.
///
/// # Examples
/// ```
/// use ip_whitelist::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;

    let mask = (all_bits >> right_len) << right_len;

    mask as u32
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(addr) & get_cidr_mask(len))
}

/// Calculate the broadcast (highest) address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Ipv4Addr {
    let mask = get_cidr_mask(len);
    let network_bits = u32::from(addr) & mask;
    Ipv4Addr::from(network_bits | !mask)
}

/// Parse a dotted-quad IPv4 address.
///
/// Leading and trailing whitespace is ignored. Each of the four segments
/// must be a non-empty run of ASCII digits with a value in `0..=255`;
/// leading zeros are read as decimal.
pub fn parse_ip_address(text: &str) -> Result<Ipv4Addr, ParseError> {
    parse_octets(text.trim())
}

/// Parse `"<ip>/<prefix>"` into a [`CidrBlock`], splitting on the first `/`.
///
/// The network address is kept as written; it is masked whenever it is
/// compared.
pub fn parse_cidr(text: &str) -> Result<CidrBlock, ParseError> {
    let cidr = text.trim();
    let (addr, prefix) = cidr
        .split_once('/')
        .ok_or_else(|| ParseError::MissingPrefix(cidr.to_string()))?;
    let addr = parse_octets(addr)?;

    let invalid_prefix = || ParseError::InvalidPrefix {
        cidr: cidr.to_string(),
        prefix: prefix.to_string(),
    };
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_prefix());
    }
    let prefix: u32 = prefix.parse().map_err(|_| invalid_prefix())?;
    if prefix > MAX_LENGTH as u32 {
        return Err(ParseError::PrefixOutOfRange {
            cidr: cidr.to_string(),
            prefix,
        });
    }

    Ok(CidrBlock {
        addr,
        mask: prefix as u8,
    })
}

fn parse_octets(addr: &str) -> Result<Ipv4Addr, ParseError> {
    let parts: Vec<&str> = addr.split('.').collect();
    if parts.len() != 4 {
        return Err(ParseError::SegmentCount(addr.to_string()));
    }

    let mut bits: u32 = 0;
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidOctet {
                addr: addr.to_string(),
                octet: part.to_string(),
            });
        }
        // digits only, so a parse failure can only be overflow
        let octet: u8 = part.parse().map_err(|_| ParseError::OctetOutOfRange {
            addr: addr.to_string(),
            octet: part.to_string(),
        })?;
        bits = (bits << 8) | octet as u32;
    }
    Ok(Ipv4Addr::from(bits))
}

/// IPv4 block in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    addr: Ipv4Addr,
    mask: u8,
}

impl CidrBlock {
    /// Build a block from an address and prefix length (0-32).
    pub fn new(addr: Ipv4Addr, mask: u8) -> Result<CidrBlock, ParseError> {
        if mask > MAX_LENGTH {
            return Err(ParseError::PrefixOutOfRange {
                cidr: format!("{addr}/{mask}"),
                prefix: mask as u32,
            });
        }
        Ok(CidrBlock { addr, mask })
    }

    /// Build a block in a `const` context; an out of range `mask` fails
    /// compilation there, and panics anywhere else.
    pub const fn new_const(addr: Ipv4Addr, mask: u8) -> CidrBlock {
        assert!(mask <= MAX_LENGTH, "prefix length above 32");
        CidrBlock { addr, mask }
    }

    /// Single-host `/32` block.
    pub fn host(addr: Ipv4Addr) -> CidrBlock {
        CidrBlock {
            addr,
            mask: MAX_LENGTH,
        }
    }

    /// The address as written, not necessarily aligned to the prefix.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// The prefix length (0-32).
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Subnet mask as u32.
    pub fn mask_bits(&self) -> u32 {
        get_cidr_mask(self.mask)
    }

    /// Get the lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        cut_addr(self.addr, self.mask)
    }

    /// Get the highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.mask)
    }

    /// Number of addresses covered, `2^(32 - prefix)`.
    pub fn num_addresses(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask)
    }
}

impl FromStr for CidrBlock {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_cidr(&s).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
