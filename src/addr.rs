//! Permissive IPv4 address codec.
//!
//! Addresses are packed big-endian: `a.b.c.d` is `(a << 24) | (b << 16) | (c << 8) | d`.
//!
//! None of the parsers here fail. Components are read left to right as 32-bit
//! decimal numbers; the first one that is not a number reads as `0` and stops the
//! scan, so every later component is `0` too. Packing shifts the components
//! without range checks, so bits pushed past the top are dropped:
//! `"256.255.255.0"` packs to `0.255.255.0` and `"300.1.1.1"` to `44.1.1.1`.
//! `"10.1.x.7"` packs to `10.1.0.0`. Callers that need validation should use
//! [`std::net::Ipv4Addr`] before handing text to the index.

use std::net::Ipv4Addr;
use std::str::FromStr;

/// Parse `a.b.c.d` into its packed integer form.
///
/// Anything following the fourth component (such as a `/mask`) is ignored.
pub fn parse_address(text: &str) -> u32 {
    let (parts, _) = scan_components::<u32>(text);
    pack(parts)
}

/// Format a packed address as four dotted decimal octets.
pub fn format_address(ip: u32) -> String {
    Ipv4Addr::from(ip).to_string()
}

/// Parse `a.b.c.d/mask` into inclusive `(start, end)` bounds.
///
/// `end` is `start` with every host bit set; the base address is not masked.
/// A missing or unreadable mask reads as `/0`, and any mask above 32 also
/// spans to `255.255.255.255`. Only `/32` yields a single host.
pub fn parse_cidr_range(cidr: &str) -> (u32, u32) {
    let (parts, rest) = scan_components::<u32>(cidr);
    let start = pack(parts);
    let prefix = rest
        .and_then(|r| r.strip_prefix('/'))
        .and_then(leading_number::<u32>)
        .map(|(prefix, _)| prefix)
        .unwrap_or(0);
    (start, start | host_mask(prefix))
}

/// Extract one dotted component (1-indexed) of an address.
///
/// Components are read as 8-bit numbers here, so one above 255 reads as `0` and
/// stops the scan. Positions outside `1..=4` yield `0`.
pub fn octet_of(text: &str, position: usize) -> u8 {
    let (octets, _) = scan_components::<u8>(text);
    match position {
        1..=4 => octets[position - 1],
        _ => 0,
    }
}

/// First octet of a packed address; this is the bucket key.
#[inline]
pub fn first_octet(ip: u32) -> u8 {
    (ip >> 24) as u8
}

/// Check if `ip` lies within `[start, end]`.
#[inline]
pub fn in_range(ip: u32, start: u32, end: u32) -> bool {
    ip >= start && ip <= end
}

/// Check if the address text lies within the CIDR text.
pub fn in_cidr(ip: &str, cidr: &str) -> bool {
    let (start, end) = parse_cidr_range(cidr);
    in_range(parse_address(ip), start, end)
}

fn host_mask(prefix: u32) -> u32 {
    match prefix {
        0 | 33..=u32::MAX => u32::MAX,
        32 => 0,
        p => u32::MAX >> p,
    }
}

/// Pack four components, dropping bits shifted past the top.
fn pack([a, b, c, d]: [u32; 4]) -> u32 {
    a << 24 | b << 16 | c << 8 | d
}

/// Read up to four dot-separated numbers from the front of `text`.
///
/// The remainder is returned only when all four components were read.
fn scan_components<T: FromStr + Default + Copy>(text: &str) -> ([T; 4], Option<&str>) {
    let mut octets = [T::default(); 4];
    let mut rest = text.trim_start();

    for i in 0..4 {
        if i > 0 {
            match rest.strip_prefix('.') {
                Some(r) => rest = r,
                None => return (octets, None),
            }
        }
        match leading_number::<T>(rest) {
            Some((value, r)) => {
                octets[i] = value;
                rest = r;
            }
            None => return (octets, None),
        }
    }

    (octets, Some(rest))
}

fn leading_number<T: FromStr>(text: &str) -> Option<(T, &str)> {
    let len = text.bytes().take_while(u8::is_ascii_digit).count();
    let value = text[..len].parse().ok()?;
    Some((value, &text[len..]))
}
