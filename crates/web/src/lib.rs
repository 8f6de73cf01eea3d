use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use http::HeaderMap;

pub mod response;

fn first_forwarded_ip(headers: &HeaderMap, name: &str) -> Option<IpAddr> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|s| s.split(',').next().map(str::trim).and_then(|ip| IpAddr::from_str(ip).ok()))
}

/// Resolves the client address of a request, preferring proxy headers over the
/// peer socket address.
///
/// `peer` is `None` when the router is not served with connect info, as in
/// in-process tests.
#[must_use]
pub fn request_ip(headers: &HeaderMap, peer: Option<&SocketAddr>) -> Option<IpAddr> {
    let x_forwarded_for = first_forwarded_ip(headers, "X-Forwarded-For");
    let x_real_ip = first_forwarded_ip(headers, "X-Real-IP");

    tracing::debug!(?x_forwarded_for, ?x_real_ip, peer = ?peer);

    x_forwarded_for.or(x_real_ip).or_else(|| peer.map(SocketAddr::ip))
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use http::{HeaderName, HeaderValue};

    use super::*;

    #[test]
    fn test_forwarded_for_takes_precedence() {
        let headers = HeaderMap::from_iter([
            (
                HeaderName::from_static("x-forwarded-for"),
                HeaderValue::from_static("10.0.0.1, 10.0.0.2"),
            ),
            (HeaderName::from_static("x-real-ip"), HeaderValue::from_static("10.0.0.3")),
        ]);
        let peer = SocketAddr::from((Ipv4Addr::LOCALHOST, 4000));

        assert_eq!(
            request_ip(&headers, Some(&peer)),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
        );
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let headers = HeaderMap::from_iter([(
            HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_static("not-an-ip"),
        )]);
        let peer = SocketAddr::from((Ipv4Addr::LOCALHOST, 4000));

        assert_eq!(request_ip(&headers, Some(&peer)), Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(request_ip(&HeaderMap::new(), None), None);
    }
}
