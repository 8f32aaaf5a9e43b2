//! RFC1918 private range checks.
//!
//! Only internet-facing addresses may be whitelisted, so anything touching
//! a private range is refused.

use crate::models::CidrBlock;
use std::net::Ipv4Addr;

/// The three RFC1918 blocks.
pub static PRIVATE_RANGES: [CidrBlock; 3] = [
    CidrBlock::new_const(Ipv4Addr::new(10, 0, 0, 0), 8),
    CidrBlock::new_const(Ipv4Addr::new(172, 16, 0, 0), 12),
    CidrBlock::new_const(Ipv4Addr::new(192, 168, 0, 0), 16),
];

/// Private ranges as [`CidrBlock`]s.
pub fn private_ranges() -> impl Iterator<Item = CidrBlock> {
    PRIVATE_RANGES.iter().copied()
}

/// True if `ip` is inside 10/8, 172.16/12 or 192.168/16.
pub fn is_private_address(ip: Ipv4Addr) -> bool {
    let ip = u32::from(ip);
    private_ranges().any(|range| u32::from(range.lo()) <= ip && ip <= u32::from(range.hi()))
}

/// True if any address of `block` is private.
///
/// Interval overlap, not containment: a mostly public block that touches
/// a private range is still refused.
pub fn cidr_overlaps_private_range(block: &CidrBlock) -> bool {
    let lo = u32::from(block.lo());
    let hi = u32::from(block.hi());
    private_ranges().any(|range| {
        let overlaps = lo <= u32::from(range.hi()) && u32::from(range.lo()) <= hi;
        if overlaps {
            log::trace!("{block} overlaps private range {range}");
        }
        overlaps
    })
}
