use std::env;
use std::net::IpAddr;

/// Fallback address when neither a forwarded header nor a peer address is
/// known.
pub const LOOPBACK: &str = "127.0.0.1";

/// Identity of the acting principal, attached to every record.
#[derive(Debug, Clone)]
pub struct ActorContext {
    /// May be empty for anonymous actors.
    pub user_id: String,
    pub ip_address: String,
}

impl ActorContext {
    pub fn new(user_id: &str, ip_address: &str) -> Self {
        ActorContext {
            user_id: user_id.to_string(),
            ip_address: ip_address.to_string(),
        }
    }

    /// Anonymous actor on the loopback address.
    pub fn anonymous() -> Self {
        ActorContext {
            user_id: String::new(),
            ip_address: LOOPBACK.to_string(),
        }
    }

    /// Context from the process environment: `CHRONICA_USER` for the
    /// principal, `HTTP_X_FORWARDED_FOR` and `REMOTE_ADDR` for the address.
    pub fn from_env() -> Self {
        let user_id = env::var("CHRONICA_USER").unwrap_or_default();
        let forwarded = env::var("HTTP_X_FORWARDED_FOR").ok();
        let peer = env::var("REMOTE_ADDR")
            .ok()
            .and_then(|addr| addr.parse::<IpAddr>().ok());
        ActorContext {
            user_id,
            ip_address: resolve_ip(forwarded.as_deref(), peer),
        }
    }
}

/// Best-effort client address: first forwarded-for entry, then the direct
/// peer address, then loopback. Not validated against spoofing.
pub fn resolve_ip(forwarded_for: Option<&str>, peer: Option<IpAddr>) -> String {
    if let Some(header) = forwarded_for {
        if let Some(first) = header.split(',').next() {
            let trimmed = first.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    match peer {
        Some(addr) => addr.to_string(),
        None => LOOPBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_header_wins_and_takes_the_first_entry() {
        let peer: IpAddr = "10.0.0.9".parse().unwrap();
        let ip = resolve_ip(Some("203.0.113.7, 10.0.0.1"), Some(peer));
        assert_eq!(ip, "203.0.113.7");
    }

    #[test]
    fn peer_address_is_the_fallback() {
        let peer: IpAddr = "10.0.0.9".parse().unwrap();
        assert_eq!(resolve_ip(None, Some(peer)), "10.0.0.9");
        assert_eq!(resolve_ip(Some("   "), Some(peer)), "10.0.0.9");
    }

    #[test]
    fn loopback_is_the_default() {
        assert_eq!(resolve_ip(None, None), LOOPBACK);
    }
}
