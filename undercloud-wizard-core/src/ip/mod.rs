use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use thiserror::Error;

pub mod range;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("Couldn't parse '{}' as an IPv4 CIDR!", .0)]
    Invalid(String),
}

/// Parses a provisioning block. A bare address is treated as a single-address (`/32`) block.
pub fn parse_block(raw: &str) -> Result<Ipv4Net, BlockError> {
    raw.parse::<Ipv4Net>()
        .ok()
        .or_else(|| {
            raw.parse::<Ipv4Addr>()
                .ok()
                .and_then(|address| Ipv4Net::new(address, 32).ok())
        })
        .ok_or_else(|| BlockError::Invalid(raw.to_owned()))
}

/// Ordinal access to the addresses of a block, counted from the network address.
pub trait Offset {
    /// number of addresses in the block, network and broadcast included
    fn size(&self) -> u64;
    fn nth(&self, offset: u32) -> Option<Ipv4Addr>;
}

impl Offset for Ipv4Net {
    fn size(&self) -> u64 {
        1u64 << (32 - self.prefix_len())
    }

    fn nth(&self, offset: u32) -> Option<Ipv4Addr> {
        if u64::from(offset) >= self.size() {
            return None;
        }

        u32::from(self.network())
            .checked_add(offset)
            .map(Ipv4Addr::from)
    }
}

pub trait Contains<T> {
    fn contains(&self, other: &T) -> bool;
}

impl Contains<Ipv4Addr> for Ipv4Net {
    fn contains(&self, other: &Ipv4Addr) -> bool {
        self.contains(other)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use ipnet::Ipv4Net;

    use super::{parse_block, BlockError, Offset};

    #[test]
    fn block_size_follows_prefix() {
        let sizes = [
            ("192.0.2.0/24", 256),
            ("192.0.2.0/29", 8),
            ("10.0.0.0/8", 1 << 24),
            ("0.0.0.0/0", 1 << 32),
            ("192.0.2.7/32", 1),
        ];

        for (raw, size) in sizes {
            assert_eq!(parse_block(raw).unwrap().size(), size, "{raw}");
        }
    }

    #[test]
    fn nth_counts_from_network_address() {
        let block: Ipv4Net = "192.0.2.0/24".parse().unwrap();

        assert_eq!(block.nth(0), Some(Ipv4Addr::new(192, 0, 2, 0)));
        assert_eq!(block.nth(1), Some(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(block.nth(255), Some(Ipv4Addr::new(192, 0, 2, 255)));
        assert_eq!(block.nth(256), None);
    }

    #[test]
    fn nth_ignores_host_bits_of_the_input() {
        let block = parse_block("192.0.2.77/24").unwrap();

        assert_eq!(block.nth(1), Some(Ipv4Addr::new(192, 0, 2, 1)));
    }

    #[test]
    fn nth_does_not_overflow_at_the_top_of_the_address_space() {
        let block = parse_block("255.255.255.252/30").unwrap();

        assert_eq!(block.nth(3), Some(Ipv4Addr::BROADCAST));
        assert_eq!(block.nth(4), None);
    }

    #[test]
    fn bare_address_parses_as_single_address_block() {
        let block = parse_block("192.0.2.7").unwrap();

        assert_eq!(block.prefix_len(), 32);
        assert_eq!(block.size(), 1);
    }

    #[test]
    fn garbage_is_rejected() {
        for raw in ["", "not-a-cidr", "192.0.2.0/33", "2001:db8::/64", "192.0.2/24"] {
            assert_eq!(parse_block(raw), Err(BlockError::Invalid(raw.to_owned())), "{raw}");
        }
    }
}
