//! Property-based tests for trailing-parameter handling.
//!
//! Whatever follows the `:` that opens the trailing parameter must come back
//! as exactly one parameter, spaces included.

use proptest::prelude::*;
use slirc_proto::Message;

/// Channel-ish or nick-ish middle parameter: no spaces, no leading colon.
fn middle_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&a-zA-Z0-9*=][a-zA-Z0-9_#\\-]{0,15}").expect("valid regex")
}

/// Trailing text: anything but line terminators and NUL.
fn trailing_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0]{0,200}").expect("valid regex")
}

fn command_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("AWAY".to_string()),
        Just("332".to_string()),
        Just("353".to_string()),
        Just("PRIVMSG".to_string()),
        prop::string::string_regex("[A-Z]{1,12}").expect("valid regex"),
    ]
}

proptest! {
    #[test]
    fn trailing_preserved_verbatim(
        command in command_strategy(),
        middles in prop::collection::vec(middle_strategy(), 0..5),
        trailing in trailing_strategy(),
    ) {
        let mut line = String::from(":srv ");
        line.push_str(&command);
        for middle in &middles {
            line.push(' ');
            line.push_str(middle);
        }
        line.push_str(" :");
        line.push_str(&trailing);
        line.push_str("\r\n");

        let msg: Message = line.parse().unwrap();

        prop_assert_eq!(msg.params.len(), middles.len() + 1);
        prop_assert_eq!(&msg.params[..middles.len()], middles.as_slice());
        prop_assert_eq!(msg.params.last().map(String::as_str), Some(trailing.as_str()));
    }

    #[test]
    fn parser_never_panics(line in "[^\0]{0,300}") {
        let _ = line.parse::<Message>();
    }

    #[test]
    fn serialized_trailing_reparses(
        middles in prop::collection::vec(middle_strategy(), 0..4),
        trailing in trailing_strategy(),
    ) {
        let mut params = middles.clone();
        params.push(trailing.clone());
        let msg = Message::new("NOTICE", params.clone());

        let reparsed: Message = msg.to_string().parse().unwrap();
        prop_assert_eq!(reparsed.params, params);
    }
}
