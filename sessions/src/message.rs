use serde::Deserialize;

/// Close reason sent when a verified session stops matching the registry
/// (superseded by a newer login or removed by logout).
pub const SESSION_EXPIRED: &str = "session expired";

/// The first frame a client sends on the liveness channel: the email it
/// claims to be and the session token it believes is current.
#[derive(Debug, Clone, Deserialize)]
pub struct Handshake {
    pub email: String,
    pub token: String,
}

impl Handshake {
    /// Parses a handshake payload from a text frame. Returns `None` for
    /// anything that is not the expected JSON shape; the caller treats
    /// that the same as a failed verification.
    pub fn parse(payload: &str) -> Option<Self> {
        serde_json::from_str(payload).ok()
    }
}

/// Sentinel acknowledgement sent once, right after handshake
/// verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Ok,
    Fail,
}

impl Ack {
    pub fn as_str(self) -> &'static str {
        match self {
            Ack::Ok => "ok",
            Ack::Fail => "fail",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_handshake() {
        let handshake =
            Handshake::parse(r#"{"email":"a@x.com","token":"abc123"}"#).unwrap();
        assert_eq!(handshake.email, "a@x.com");
        assert_eq!(handshake.token, "abc123");
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(Handshake::parse("").is_none());
        assert!(Handshake::parse("not json").is_none());
        assert!(Handshake::parse(r#"{"email":"a@x.com"}"#).is_none());
        assert!(Handshake::parse(r#"{"token":"abc123"}"#).is_none());
    }

    #[test]
    fn ack_sentinels_are_stable() {
        assert_eq!(Ack::Ok.as_str(), "ok");
        assert_eq!(Ack::Fail.as_str(), "fail");
    }
}
