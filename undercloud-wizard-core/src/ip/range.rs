use std::{
    fmt::{Display, Formatter},
    net::Ipv4Addr,
};

use ipnet::Ipv4Net;

use super::{Contains, Offset};

/// Inclusive range of consecutive IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
}

impl AddressRange {
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> Self {
        Self { start, end }
    }

    /// Takes `count` addresses of `block` starting at `first_offset`.
    /// Returns `None` when the block can't hold them or `count` is zero.
    pub fn from_offsets(block: &Ipv4Net, first_offset: u32, count: u32) -> Option<Self> {
        let last_offset = first_offset.checked_add(count.checked_sub(1)?)?;

        Some(Self {
            start: block.nth(first_offset)?,
            end: block.nth(last_offset)?,
        })
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    pub fn len(&self) -> u64 {
        if !self.is_ordered() {
            return 0;
        }

        u64::from(u32::from(self.end)) - u64::from(u32::from(self.start)) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &AddressRange) -> bool {
        self.is_ordered()
            && other.is_ordered()
            && self.start <= other.end
            && other.start <= self.end
    }

    pub fn is_within(&self, block: &Ipv4Net) -> bool {
        block.contains(&self.start) && block.contains(&self.end)
    }
}

impl Contains<Ipv4Addr> for AddressRange {
    fn contains(&self, other: &Ipv4Addr) -> bool {
        self.start <= *other && *other <= self.end
    }
}

impl Display for AddressRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{},{}", self.start, self.end))
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use ipnet::Ipv4Net;

    use super::AddressRange;
    use crate::ip::Contains;

    fn range(start: u8, end: u8) -> AddressRange {
        AddressRange::new(Ipv4Addr::new(192, 0, 2, start), Ipv4Addr::new(192, 0, 2, end))
    }

    #[test]
    fn from_offsets_takes_exactly_count_addresses() {
        let block: Ipv4Net = "192.0.2.0/24".parse().unwrap();
        let pool = AddressRange::from_offsets(&block, 4, 12).unwrap();

        assert_eq!(pool, range(4, 15));
        assert_eq!(pool.len(), 12);
    }

    #[test]
    fn from_offsets_refuses_ranges_spilling_out_of_the_block() {
        let block: Ipv4Net = "192.0.2.0/29".parse().unwrap();

        assert!(AddressRange::from_offsets(&block, 4, 4).is_some());
        assert!(AddressRange::from_offsets(&block, 4, 5).is_none());
        assert!(AddressRange::from_offsets(&block, 4, 0).is_none());
    }

    #[test]
    fn overlap_is_symmetric_and_inclusive() {
        assert!(range(4, 15).overlaps(&range(15, 17)));
        assert!(range(15, 17).overlaps(&range(4, 15)));
        assert!(range(4, 20).overlaps(&range(10, 12)));
        assert!(!range(4, 15).overlaps(&range(16, 17)));
        assert!(!range(9, 4).overlaps(&range(4, 9)));
    }

    #[test]
    fn contains_checks_both_bounds() {
        let pool = range(4, 15);

        assert!(pool.contains(&Ipv4Addr::new(192, 0, 2, 4)));
        assert!(pool.contains(&Ipv4Addr::new(192, 0, 2, 15)));
        assert!(!pool.contains(&Ipv4Addr::new(192, 0, 2, 3)));
        assert!(!pool.contains(&Ipv4Addr::new(192, 0, 2, 16)));
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(range(9, 4).is_empty());
        assert!(!range(9, 4).is_ordered());
    }

    #[test]
    fn displays_as_comma_separated_pair() {
        assert_eq!(range(16, 17).to_string(), "192.0.2.16,192.0.2.17");
    }
}
