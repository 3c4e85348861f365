//! IP address range classification.
//!
//! Maps an address to a rejection reason when it falls in a range that must
//! never be fetched on behalf of a caller: loopback, private, link-local,
//! multicast, unspecified, reserved, IPv6 site-local, and the cloud metadata
//! endpoint. Public unicast addresses map to `None`.
//!
//! The stable standard library covers loopback/private/link-local/multicast/
//! unspecified; the remaining ranges are spelled out in explicit tables here
//! rather than pulled from unstable `is_reserved`-style methods.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The cloud metadata endpoint (AWS/GCP/Azure instance metadata).
///
/// Link-local like the rest of 169.254.0.0/16, but reported with its own
/// reason string so operators reading logs see the high-value target named.
pub const CLOUD_METADATA_V4: Ipv4Addr = Ipv4Addr::new(169, 254, 169, 254);

/// IPv4 ranges that are IANA-reserved or otherwise never valid fetch
/// destinations, beyond what the dedicated `is_*` predicates already cover.
const RESERVED_V4: &[(Ipv4Addr, u8)] = &[
    // "This network" (RFC 791)
    (Ipv4Addr::new(0, 0, 0, 0), 8),
    // Shared address space for carrier-grade NAT (RFC 6598)
    (Ipv4Addr::new(100, 64, 0, 0), 10),
    // IETF protocol assignments (RFC 6890)
    (Ipv4Addr::new(192, 0, 0, 0), 24),
    // TEST-NET-1/2/3 documentation ranges (RFC 5737)
    (Ipv4Addr::new(192, 0, 2, 0), 24),
    (Ipv4Addr::new(198, 51, 100, 0), 24),
    (Ipv4Addr::new(203, 0, 113, 0), 24),
    // Benchmarking (RFC 2544)
    (Ipv4Addr::new(198, 18, 0, 0), 15),
    // Reserved for future use (RFC 1112), includes 255.255.255.255
    (Ipv4Addr::new(240, 0, 0, 0), 4),
];

fn in_block_v4(ip: Ipv4Addr, network: Ipv4Addr, prefix: u8) -> bool {
    let mask = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    };
    u32::from(ip) & mask == u32::from(network) & mask
}

/// Classify an address, returning the rejection reason if it must not be
/// fetched, or `None` for public unicast addresses.
pub fn rejection(ip: IpAddr) -> Option<String> {
    match ip {
        IpAddr::V4(v4) => rejection_v4(v4),
        IpAddr::V6(v6) => rejection_v6(v6),
    }
}

fn rejection_v4(ip: Ipv4Addr) -> Option<String> {
    // Checked first: 169.254.169.254 is link-local, and the generic check
    // below would otherwise shadow the specific reason.
    if ip == CLOUD_METADATA_V4 {
        return Some(format!(
            "access to cloud metadata endpoint ({ip}) is not permitted"
        ));
    }
    if ip.is_loopback() {
        return Some(format!("loopback address ({ip}) is not permitted"));
    }
    if ip.is_private() {
        return Some(format!("private address ({ip}) is not permitted"));
    }
    if ip.is_link_local() {
        return Some(format!("link-local address ({ip}) is not permitted"));
    }
    if ip.is_multicast() {
        return Some(format!("multicast address ({ip}) is not permitted"));
    }
    if ip.is_unspecified() {
        return Some(format!("unspecified address ({ip}) is not permitted"));
    }
    for &(network, prefix) in RESERVED_V4 {
        if in_block_v4(ip, network, prefix) {
            return Some(format!("reserved address ({ip}) is not permitted"));
        }
    }
    None
}

fn rejection_v6(ip: Ipv6Addr) -> Option<String> {
    let first = ip.segments()[0];

    if ip.is_loopback() {
        return Some(format!("loopback address ({ip}) is not permitted"));
    }
    if ip.is_unspecified() {
        return Some(format!("unspecified address ({ip}) is not permitted"));
    }
    if ip.is_multicast() {
        return Some(format!("multicast address ({ip}) is not permitted"));
    }
    // Unique local addresses fc00::/7 (RFC 4193) are the IPv6 private range.
    if first & 0xfe00 == 0xfc00 {
        return Some(format!("private address ({ip}) is not permitted"));
    }
    // Link-local unicast fe80::/10.
    if first & 0xffc0 == 0xfe80 {
        return Some(format!("link-local address ({ip}) is not permitted"));
    }
    // Site-local fec0::/10: deprecated (RFC 3879) but still routable on
    // legacy internal networks.
    if first & 0xffc0 == 0xfec0 {
        return Some(format!("site-local IPv6 address ({ip}) is not permitted"));
    }
    // Documentation range 2001:db8::/32 sits inside global unicast space.
    if first == 0x2001 && ip.segments()[1] == 0x0db8 {
        return Some(format!("reserved address ({ip}) is not permitted"));
    }
    // Everything outside global unicast 2000::/3 that survived the checks
    // above is IANA-reserved space. This also covers IPv4-mapped and
    // IPv4-compatible forms, which a resolver has no business returning.
    if first & 0xe000 != 0x2000 {
        return Some(format!("reserved address ({ip}) is not permitted"));
    }
    None
}
