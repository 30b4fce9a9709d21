//! Property-based tests for cni_log using proptest

use cni_log::prelude::*;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

fn capture(threshold: Level) -> (Logger, SharedBuffer) {
    let console = SharedBuffer::new();
    let logger = Logger::with_console(console.clone());
    logger.set_prefixer(PrefixerFn(|level: Level| format!("{} ", level)));
    logger.set_structured_prefixer(StructuredPrefixerFn(
        |_level: Level, msg: &str| -> Vec<FieldValue> { vec!["msg".into(), msg.into()] },
    ));
    logger.set_log_level(threshold);
    (logger, console)
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    #[test]
    fn test_level_name_roundtrip(level in any_level()) {
        prop_assert_eq!(Level::parse(level.as_str()), level);
        prop_assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
    }

    /// Any mix of upper and lower case parses to the same level
    #[test]
    fn test_level_parse_case_insensitive(
        level in any_level(),
        mask in prop::collection::vec(any::<bool>(), 8),
    ) {
        let mixed: String = level
            .as_str()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(Level::parse(&mixed), level);
    }

    #[test]
    fn test_unknown_names_are_invalid(name in "[a-z]{0,12}") {
        prop_assume!(Level::ALL.iter().all(|level| level.as_str() != name));
        prop_assert_eq!(Level::parse(&name), Level::Invalid);
        prop_assert!(name.parse::<Level>().is_err());
    }

    #[test]
    fn test_rank_roundtrip(rank in -5i64..12) {
        let level = Level::from_rank(rank);
        if (1..=6).contains(&rank) {
            prop_assert_eq!(level.rank(), rank);
        } else {
            prop_assert_eq!(level, Level::Invalid);
        }
    }

    #[test]
    fn test_level_json(level in any_level()) {
        let json = serde_json::to_string(&level).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", level.as_str()));
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

proptest! {
    /// A message is written exactly when its level is at or below the threshold
    #[test]
    fn test_level_gate(threshold in any_level(), level in any_level(), message in "[a-zA-Z0-9 ]{0,40}") {
        let (logger, console) = capture(threshold);
        logger.log(level, format_args!("{}", message));

        if level <= threshold {
            prop_assert_eq!(console.contents(), format!("{} {}\n", level, message));
        } else {
            prop_assert!(console.is_empty());
        }
    }

    #[test]
    fn test_messages_never_panic(message in ".*") {
        let (logger, _console) = capture(Level::Verbose);
        logger.infof(format_args!("{}", message));
        let _ = logger.info_structured(&message, &[message.as_str().into(), message.as_str().into()]);
    }

    #[test]
    fn test_invalid_threshold_ignored(threshold in any_level()) {
        let (logger, console) = capture(threshold);
        console.clear();
        logger.set_log_level(Level::Invalid);
        prop_assert_eq!(logger.log_level(), threshold);
        prop_assert_eq!(
            console.lines(),
            vec!["cni-log: cannot set logging level to 'invalid'".to_string()]
        );
    }
}

// ============================================================================
// Structured Message Tests
// ============================================================================

proptest! {
    /// Even field lists render one pair per key; odd ones are rejected
    #[test]
    fn test_structured_field_parity(values in prop::collection::vec(0i64..1000, 0..10)) {
        let (logger, console) = capture(Level::Info);
        let fields: Vec<FieldValue> = values.iter().map(|v| FieldValue::from(*v)).collect();
        let result = logger.info_structured("m", &fields);

        if values.len() % 2 == 0 {
            prop_assert!(result.is_ok());
            let line = console.lines().pop().unwrap();
            prop_assert_eq!(line.matches('=').count(), 1 + values.len() / 2);
        } else {
            prop_assert!(result.unwrap_err().is_contract_violation());
            prop_assert!(console.is_empty());
        }
    }

    /// Values are quoted and escaped so the pair list stays on one line
    #[test]
    fn test_structured_values_quoted(value in ".*") {
        let (logger, console) = capture(Level::Info);
        logger
            .info_structured("m", &["k".into(), value.as_str().into()])
            .unwrap();
        let line = console.lines().pop().unwrap_or_default();
        prop_assert_eq!(line, format!("msg=\"m\" k={:?}", value));
    }
}
