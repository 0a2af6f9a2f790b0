use std::net::Ipv6Addr;
use url::{Host, Url};

/// Returns true if the URL targets a loopback address
///
/// Matches `localhost`, any `127.x.x.x` address and the IPv6 loopback in any
/// zero-padded spelling (`[::1]`, `[0:0:0:0:0:0:0:1]`, `[0000::0001]`).
pub fn is_local_link(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(addr)) => addr.octets()[0] == 127,
        Some(Host::Ipv6(addr)) => addr == Ipv6Addr::LOCALHOST,
        None => false,
    }
}
