use std::fmt::{self, Display, Formatter};

use super::types::Message;

/// Whether `param` must be sent as the trailing (`:`-prefixed) parameter.
fn needs_trailing(param: &str) -> bool {
    param.is_empty() || param.starts_with(':') || param.contains(' ')
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        f.write_str(&self.command)?;

        if let Some((last, init)) = self.params.split_last() {
            for param in init {
                write!(f, " {}", param)?;
            }
            if needs_trailing(last) {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }

        f.write_str("\r\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Capability;

    #[test]
    fn test_serialize_literals() {
        assert_eq!(Message::cap_end().to_string(), "CAP END\r\n");
        assert_eq!(
            Message::authenticate("PLAIN").to_string(),
            "AUTHENTICATE PLAIN\r\n"
        );
        assert_eq!(
            Message::bouncer_bind("net1").to_string(),
            "BOUNCER BIND net1\r\n"
        );
    }

    #[test]
    fn test_serialize_trailing_with_spaces() {
        assert_eq!(
            Message::user("foo", "Foo Bar").to_string(),
            "USER foo 0 * :Foo Bar\r\n"
        );
    }

    #[test]
    fn test_serialize_empty_trailing() {
        assert_eq!(Message::new("AWAY", [""]).to_string(), "AWAY :\r\n");
    }

    #[test]
    fn test_serialize_cap_req() {
        assert_eq!(
            Message::cap_req(&Capability::Sasl).to_string(),
            "CAP REQ sasl\r\n"
        );
    }

    #[test]
    fn test_serialize_with_prefix() {
        let mut msg = Message::pong("token");
        msg.prefix = Some("me".to_owned());
        assert_eq!(msg.to_string(), ":me PONG token\r\n");
    }
}
