//! Address-in-block and block-in-block tests.

use crate::models::{get_cidr_mask, CidrBlock};
use std::net::Ipv4Addr;

/// True if `ip` falls inside `block`.
///
/// Both sides are masked with the block prefix, so `/0` matches every
/// address and `/32` only the exact address.
pub fn address_in_cidr(ip: Ipv4Addr, block: &CidrBlock) -> bool {
    let mask = get_cidr_mask(block.mask());
    (u32::from(ip) & mask) == (u32::from(block.addr()) & mask)
}

/// True if every address of `inner` is also in `outer`.
///
/// A block contains itself. A block never fits inside one with a longer
/// prefix.
pub fn cidr_contains_cidr(inner: &CidrBlock, outer: &CidrBlock) -> bool {
    if inner.mask() < outer.mask() {
        return false;
    }
    let mask = get_cidr_mask(outer.mask());
    (u32::from(inner.addr()) & mask) == (u32::from(outer.addr()) & mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_cidr;

    fn cidr(s: &str) -> CidrBlock {
        parse_cidr(s).unwrap()
    }

    #[test]
    fn test_address_in_cidr() {
        let block = cidr("203.119.24.0/24");
        assert!(address_in_cidr(Ipv4Addr::new(203, 119, 24, 100), &block));
        assert!(address_in_cidr(Ipv4Addr::new(203, 119, 24, 0), &block));
        assert!(address_in_cidr(Ipv4Addr::new(203, 119, 24, 255), &block));
        assert!(!address_in_cidr(Ipv4Addr::new(203, 119, 25, 0), &block));
        assert!(!address_in_cidr(Ipv4Addr::new(203, 119, 23, 255), &block));
    }

    #[test]
    fn test_address_in_unaligned_cidr() {
        // network part is masked before comparing
        let block = cidr("203.119.24.77/24");
        assert!(address_in_cidr(Ipv4Addr::new(203, 119, 24, 1), &block));
    }

    #[test]
    fn test_address_in_cidr_edges() {
        let all = cidr("1.2.3.4/0");
        assert!(address_in_cidr(Ipv4Addr::new(0, 0, 0, 0), &all));
        assert!(address_in_cidr(Ipv4Addr::BROADCAST, &all));

        let host = cidr("8.8.8.8/32");
        assert!(address_in_cidr(Ipv4Addr::new(8, 8, 8, 8), &host));
        assert!(!address_in_cidr(Ipv4Addr::new(8, 8, 8, 9), &host));

        let high = cidr("255.255.255.0/24");
        assert!(address_in_cidr(Ipv4Addr::new(255, 255, 255, 1), &high));
        assert!(!address_in_cidr(Ipv4Addr::new(127, 255, 255, 1), &high));
    }

    #[test]
    fn test_cidr_contains_cidr() {
        let outer = cidr("203.0.113.0/24");
        assert!(cidr_contains_cidr(&cidr("203.0.113.0/25"), &outer));
        assert!(cidr_contains_cidr(&cidr("203.0.113.128/25"), &outer));
        assert!(cidr_contains_cidr(&cidr("203.0.113.7/32"), &outer));
        assert!(!cidr_contains_cidr(&cidr("203.0.114.0/25"), &outer));
        // broader never fits in narrower
        assert!(!cidr_contains_cidr(&outer, &cidr("203.0.113.0/25")));
        assert!(!cidr_contains_cidr(&cidr("203.0.0.0/16"), &outer));
    }

    #[test]
    fn test_cidr_contains_itself() {
        let block = cidr("203.0.113.0/24");
        assert!(cidr_contains_cidr(&block, &block));
        // same masked network, written differently
        assert!(cidr_contains_cidr(&cidr("203.0.113.9/24"), &block));
        assert!(cidr_contains_cidr(&block, &cidr("203.0.113.9/24")));
    }

    #[test]
    fn test_everything_inside_slash_zero() {
        let all = cidr("0.0.0.0/0");
        assert!(cidr_contains_cidr(&cidr("128.0.0.0/1"), &all));
        assert!(cidr_contains_cidr(&cidr("255.255.255.255/32"), &all));
        assert!(!cidr_contains_cidr(&all, &cidr("128.0.0.0/1")));
    }
}
