//! PLAIN SASL mechanism (RFC 4616).
//!
//! # Reference
//! - RFC 4616: <https://tools.ietf.org/html/rfc4616>

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Encode credentials for the PLAIN mechanism with an explicit authzid.
///
/// The payload is `authzid NUL authcid NUL password`, base64-encoded.
///
/// ```
/// use slirc_proto::sasl::encode_plain_with_authzid;
///
/// assert_eq!(encode_plain_with_authzid("foo", "bar", "baz"), "Zm9vAGJhcgBiYXo=");
/// ```
pub fn encode_plain_with_authzid(authzid: &str, authcid: &str, password: &str) -> String {
    let payload = format!("{}\0{}\0{}", authzid, authcid, password);
    BASE64.encode(payload.as_bytes())
}
