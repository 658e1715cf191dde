use std::net::SocketAddr;

/// Derives the best-guess originating address for a request.
///
/// When a forwarded-for header value is present and non-empty, the leftmost
/// entry of the comma-separated chain is taken (the conventional "original
/// client" position) and trimmed — even when that entry itself is blank, as
/// in `",10.0.0.1"`. Only an absent or entirely empty header falls back to
/// the transport peer IP; if that is unknown too, the result is empty.
///
/// The header is attacker-controllable and the result is never validated:
/// it is opaque text recorded for intelligence value, and must not be used
/// for any access-control decision.
pub fn resolve_source_address(peer: Option<SocketAddr>, forwarded_for: Option<&str>) -> String {
    if let Some(value) = forwarded_for {
        if !value.trim().is_empty() {
            return value
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
        }
    }
    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> Option<SocketAddr> {
        Some("198.51.100.9:44312".parse().unwrap())
    }

    #[test]
    fn test_forwarded_chain_takes_leftmost() {
        let addr = resolve_source_address(peer(), Some("203.0.113.5, 10.0.0.1"));
        assert_eq!(addr, "203.0.113.5");
    }

    #[test]
    fn test_forwarded_single_entry_trimmed() {
        let addr = resolve_source_address(peer(), Some("  203.0.113.5  "));
        assert_eq!(addr, "203.0.113.5");
    }

    #[test]
    fn test_no_header_falls_back_to_peer_ip() {
        let addr = resolve_source_address(peer(), None);
        assert_eq!(addr, "198.51.100.9");
    }

    #[test]
    fn test_empty_header_falls_back_to_peer_ip() {
        let addr = resolve_source_address(peer(), Some("   "));
        assert_eq!(addr, "198.51.100.9");
    }

    #[test]
    fn test_blank_leftmost_entry_is_recorded_as_empty() {
        // a present chain is used as-is, even when its first hop is blank
        let addr = resolve_source_address(peer(), Some(",10.0.0.1"));
        assert_eq!(addr, "");
    }

    #[test]
    fn test_unresolvable_is_empty() {
        let addr = resolve_source_address(None, None);
        assert_eq!(addr, "");
    }

    #[test]
    fn test_header_is_opaque_text() {
        // Nothing checks that the entry is a syntactically valid address.
        let addr = resolve_source_address(peer(), Some("evil-garbage, 10.0.0.1"));
        assert_eq!(addr, "evil-garbage");
    }
}
