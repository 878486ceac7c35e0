//! Property-based tests for rust_logger_facade using proptest

use proptest::prelude::*;
use rust_logger_facade::prelude::*;
use rust_logger_facade::handle_fields;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::DPanic),
        Just(LogLevel::Panic),
        Just(LogLevel::Fatal),
    ]
}

/// Flip the case of each character according to `mask`
fn recase(s: &str, mask: u32) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << (i % 32)) != 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level in any case
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), mask in any::<u32>()) {
        let name = recase(level.to_str(), mask);
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Ordering of levels matches their numeric values
    #[test]
    fn test_log_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a.cmp(&b), a.as_i8().cmp(&b.as_i8()));
    }

    /// An engine writes exactly the levels at or above its threshold
    #[test]
    fn test_enabled_matches_threshold(threshold in any_level(), v in -10i8..10) {
        let engine = Engine::builder().min_level(threshold).build();
        prop_assert_eq!(engine.enabled(v), v >= threshold.as_i8());
    }
}

// ============================================================================
// Options Tests
// ============================================================================

proptest! {
    /// Valid formats validate in any letter case
    #[test]
    fn test_valid_format_any_case(use_json in any::<bool>(), mask in any::<u32>()) {
        let base = if use_json { "json" } else { "console" };
        let opts = Options {
            format: recase(base, mask),
            ..Options::default()
        };
        prop_assert!(opts.validate().is_empty());
    }

    /// Unknown level strings produce exactly one error
    #[test]
    fn test_unknown_level_single_error(level in "[a-z]{6,12}") {
        prop_assume!(level.parse::<LogLevel>().is_err());
        let opts = Options {
            level,
            ..Options::default()
        };
        let errs = opts.validate();
        prop_assert_eq!(errs.len(), 1);
        prop_assert!(matches!(errs[0], LoggerError::InvalidLevel(_)));
    }
}

// ============================================================================
// Key/Value Tests
// ============================================================================

proptest! {
    /// Well-formed pairs convert one field per pair, in order, with no warning
    #[test]
    fn test_pairs_convert_in_order(pairs in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..16)) {
        let sink = MemorySink::new();
        let engine = Engine::builder().sink(sink.clone()).build();

        let args: Vec<Arg> = pairs
            .iter()
            .flat_map(|(k, v)| [Arg::from(k.as_str()), Arg::from(*v)])
            .collect();
        let fields = handle_fields(&engine, &args, &[]);

        prop_assert_eq!(fields.len(), pairs.len());
        for (field, (k, v)) in fields.iter().zip(&pairs) {
            prop_assert_eq!(&field.key, k);
            prop_assert_eq!(&field.value, &FieldValue::Int(*v));
        }
        prop_assert!(sink.contents().is_empty());
    }

    /// An odd-length list keeps every complete pair and warns once
    #[test]
    fn test_odd_list_keeps_complete_pairs(keys in prop::collection::vec("[a-z]{1,8}", 1..8)) {
        let sink = MemorySink::new();
        let engine = Engine::builder().sink(sink.clone()).build();

        let mut args: Vec<Arg> = keys
            .iter()
            .flat_map(|k| [Arg::from(k.as_str()), Arg::from(true)])
            .collect();
        args.pop();

        let fields = handle_fields(&engine, &args, &[]);
        prop_assert_eq!(fields.len(), keys.len() - 1);
        prop_assert_eq!(sink.lines().len(), 1);
    }
}
