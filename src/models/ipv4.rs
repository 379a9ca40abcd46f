//! IPv4 address blocks in CIDR notation.
//!
//! Provides [`Ipv4`], an aligned power-of-two address range, along with the
//! mask arithmetic helpers used to split and compare blocks.

use crate::error::CalcError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// `subdivide` refuses to produce more than `2^MAX_SUBDIVIDE_BITS` blocks.
pub const MAX_SUBDIVIDE_BITS: u8 = 16;

/// Addresses AWS keeps back in every subnet (network, router, DNS, future use, broadcast).
pub const RESERVED_HOSTS: u64 = 5;

/// Mask bits for a prefix length that is already known to be `<= 32`.
fn prefix_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_calculator::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, CalcError> {
    if len > MAX_LENGTH {
        Err(CalcError::parse(
            format!("/{len}"),
            "Network length is too long",
        ))
    } else {
        Ok(prefix_bits(len))
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, CalcError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Number of addresses left for hosts once AWS has taken its reserved ones.
pub fn num_usable_hosts(len: u8) -> Result<u64, CalcError> {
    if len > MAX_LENGTH - 3 {
        // a /29 still has 3 usable, anything smaller has none
        Err(CalcError::parse(
            format!("/{len}"),
            "Network length is too long or invalid",
        ))
    } else {
        Ok((1u64 << (MAX_LENGTH - len)) - RESERVED_HOSTS)
    }
}

/// Calculate the minimum mask for an IP address based on trailing zeros.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros().min(MAX_LENGTH as u32) as u8;
    MAX_LENGTH - trailing_zeros
}

/// A contiguous, aligned IPv4 address block.
///
/// The base address always has its low `32 - mask` bits cleared. Blocks order
/// by base address first, then by prefix length.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    addr: Ipv4Addr,
    mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// The address must be the network address of the block.
    pub fn new(addr_cidr: &str) -> Result<Ipv4, CalcError> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(CalcError::parse(addr_cidr, "Invalid address/mask"));
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| CalcError::parse(addr_cidr, format!("Invalid address {}", parts[0])))?;
        let mask: u8 = parts[1]
            .parse()
            .map_err(|_| CalcError::parse(addr_cidr, format!("Invalid mask {}", parts[1])))?;
        Ipv4::from_parts(addr, mask)
    }

    /// Build a block from an address and prefix length, rejecting host bits.
    pub fn from_parts(addr: Ipv4Addr, mask: u8) -> Result<Ipv4, CalcError> {
        if mask > MAX_LENGTH {
            return Err(CalcError::parse(
                format!("{addr}/{mask}"),
                "Network length is too long",
            ));
        }
        if cut_addr(addr, mask)? != addr {
            return Err(CalcError::parse(
                format!("{addr}/{mask}"),
                "Address has host bits set",
            ));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// The base (network) address.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// The prefix length (0-32).
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Number of addresses in the block.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        self.addr
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !prefix_bits(self.mask))
    }

    /// True if `target_mask` names a block no bigger than this one.
    pub fn can_hold(&self, target_mask: u8) -> bool {
        target_mask >= self.mask && target_mask <= MAX_LENGTH
    }

    /// True if every address of `inner` is also in this block.
    pub fn contains(&self, inner: &Ipv4) -> bool {
        inner.mask >= self.mask
            && (u32::from(inner.addr) & prefix_bits(self.mask)) == u32::from(self.addr)
    }

    /// Split into the lower and upper halves, each one bit longer.
    pub fn split_in_half(&self) -> Result<(Ipv4, Ipv4), CalcError> {
        if self.mask >= MAX_LENGTH {
            return Err(CalcError::SizeLimit {
                block: self.to_string(),
            });
        }
        let mask = self.mask + 1;
        let upper_bits = u32::from(self.addr) | (1u32 << (MAX_LENGTH - mask));
        Ok((
            Ipv4 {
                addr: self.addr,
                mask,
            },
            Ipv4 {
                addr: Ipv4Addr::from(upper_bits),
                mask,
            },
        ))
    }

    /// Halve the block until every piece has `new_mask`, lowest address first.
    pub fn subdivide(&self, new_mask: u8) -> Result<Vec<Ipv4>, CalcError> {
        if new_mask > MAX_LENGTH {
            return Err(CalcError::SizeLimit {
                block: self.to_string(),
            });
        }
        if new_mask < self.mask {
            return Err(CalcError::InvalidRequest {
                reason: format!("/{new_mask} is bigger than {self}"),
            });
        }
        let bits = new_mask - self.mask;
        if bits > MAX_SUBDIVIDE_BITS {
            return Err(CalcError::InvalidRequest {
                reason: format!("splitting {self} into /{new_mask} gives 2^{bits} blocks"),
            });
        }
        let mut blocks = Vec::with_capacity(1usize << bits);
        self.subdivide_into(new_mask, &mut blocks)?;
        Ok(blocks)
    }

    fn subdivide_into(&self, new_mask: u8, blocks: &mut Vec<Ipv4>) -> Result<(), CalcError> {
        if self.mask == new_mask {
            blocks.push(*self);
            return Ok(());
        }
        let (lower, upper) = self.split_in_half()?;
        lower.subdivide_into(new_mask, blocks)?;
        upper.subdivide_into(new_mask, blocks)
    }

    /// The block `n` positions above this one, with the same prefix length.
    ///
    /// `None` if it would run past 255.255.255.255.
    pub fn nth_after(&self, n: u64) -> Option<Ipv4> {
        let start = u64::from(u32::from(self.addr)).checked_add(n.checked_mul(self.size())?)?;
        let addr = u32::try_from(start).ok()?;
        Some(Ipv4 {
            addr: Ipv4Addr::from(addr),
            mask: self.mask,
        })
    }

    /// The last `count` blocks of [`Ipv4::subdivide`], without building the whole list.
    ///
    /// Returns fewer than `count` blocks when the subdivision is shorter.
    pub fn last_subnets(&self, new_mask: u8, count: usize) -> Result<Vec<Ipv4>, CalcError> {
        if !self.can_hold(new_mask) {
            return Err(CalcError::InvalidRequest {
                reason: format!("{self} can not be divided into /{new_mask}"),
            });
        }
        let piece_size = 1u64 << (MAX_LENGTH - new_mask);
        let available = self.size() / piece_size;
        let take = (count as u64).min(available);
        let end = u64::from(u32::from(self.addr)) + self.size();
        let blocks = (0..take)
            .rev()
            .map(|i| Ipv4 {
                addr: Ipv4Addr::from((end - (i + 1) * piece_size) as u32),
                mask: new_mask,
            })
            .collect();
        Ok(blocks)
    }
}

impl FromStr for Ipv4 {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
