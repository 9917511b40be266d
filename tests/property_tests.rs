//! Property-based tests for fanlog using proptest

use fanlog::prelude::*;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Error),
        Just(LogLevel::Warn),
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
        Just(LogLevel::Log),
    ]
}

proptest! {
    /// `allows` is exactly the numeric comparison `threshold >= level`
    /// under the fixed assignment Error=1 .. Log=5.
    #[test]
    fn test_allows_is_numeric_comparison(threshold in any_level(), level in any_level()) {
        prop_assert_eq!(
            threshold.allows(level),
            threshold as u8 >= level as u8
        );
    }

    /// Ordering on LogLevel is consistent with the numeric assignment.
    #[test]
    fn test_level_ordering_matches_discriminants(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
        prop_assert_eq!(level1 >= level2, val1 >= val2);
        prop_assert_eq!(level1 > level2, val1 > val2);
    }

    /// LogLevel string conversions roundtrip.
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let as_str = level.to_str();
        let parsed: LogLevel = as_str.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// LogLevel Display matches to_str.
    #[test]
    fn test_level_display(level in any_level()) {
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// Parsing accepts case-insensitive input for every level name.
    #[test]
    fn test_level_parse_case_insensitive(use_lower in any::<bool>()) {
        for name in ["ERROR", "WARN", "INFO", "DEBUG", "LOG"] {
            let input = if use_lower {
                name.to_lowercase()
            } else {
                name.to_string()
            };

            let parsed: std::result::Result<LogLevel, String> = input.parse();
            prop_assert!(parsed.is_ok(), "failed to parse: {}", input);
        }
    }

    /// Captured messages never contain raw newlines (injection prevention).
    #[test]
    fn test_captured_message_sanitized(message in ".*") {
        let event = CapturedEvent::new(LogLevel::Info, message, Vec::new());
        prop_assert!(!event.message.contains('\n'));
        prop_assert!(!event.message.contains('\r'));
        prop_assert!(!event.message.contains('\t'));
    }

    /// The default projection preserves message, timestamp and payload
    /// arity for arbitrary payloads.
    #[test]
    fn test_identity_projection(message in "[^\\n\\r\\t]*", ints in prop::collection::vec(any::<i64>(), 0..8)) {
        let payload: Vec<PayloadValue> = ints.iter().copied().map(PayloadValue::from).collect();
        let event = CapturedEvent::new(LogLevel::Debug, message.clone(), payload);
        let projected = LogMessage::from_event(&event);

        prop_assert_eq!(projected.message, event.message);
        prop_assert_eq!(projected.timestamp, event.timestamp);
        prop_assert_eq!(projected.payload.len(), ints.len());
    }

    /// Plain payload values serialize losslessly to JSON.
    #[test]
    fn test_int_payload_serialization(ints in prop::collection::vec(any::<i64>(), 0..8)) {
        let payload: Vec<PayloadValue> = ints.iter().copied().map(PayloadValue::from).collect();
        let json = serde_json::to_value(&payload).unwrap();
        let expected = serde_json::to_value(&ints).unwrap();
        prop_assert_eq!(json, expected);
    }
}
