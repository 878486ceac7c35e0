//! Conversion of loosely-typed key/value argument lists into fields
//!
//! The `*w` methods accept alternating keys and values. Conversion is
//! best-effort: a malformed list is truncated at the first problem and a
//! DPanic record describing it is written through the same engine, but the
//! logging call itself never fails. The engine never escalates DPanic, so
//! the diagnostic is visible at any threshold up to error without panicking.

use crate::core::{Engine, Field, FieldValue, LogLevel};
use serde::Serialize;
use std::panic::Location;
use std::time::Duration;

/// One element of an alternating key/value list.
///
/// Only `Arg::Value(FieldValue::String(_))` is accepted in key position.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(FieldValue),
    /// Already-typed field; not valid inside a key/value list
    Field(Field),
}

impl Arg {
    /// Argument holding any serializable value
    pub fn any<T: Serialize + ?Sized>(value: &T) -> Self {
        Arg::Value(FieldValue::any(value))
    }
}

macro_rules! impl_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Value(FieldValue::from(value))
                }
            }
        )*
    };
}

impl_arg_from!(String, &str, &String, i64, i32, u64, u32, usize, f64, bool, Duration);

impl From<FieldValue> for Arg {
    fn from(value: FieldValue) -> Self {
        Arg::Value(value)
    }
}

impl From<Field> for Arg {
    fn from(field: Field) -> Self {
        Arg::Field(field)
    }
}

/// Convert `args` into fields, then append `additional` unconditionally.
///
/// Stops at the first typed field, dangling key, or non-string key, keeping
/// whatever was converted before it and writing a DPanic diagnostic through
/// `engine`.
#[track_caller]
pub fn handle_fields(engine: &Engine, args: &[Arg], additional: &[Field]) -> Vec<Field> {
    if args.is_empty() {
        return additional.to_vec();
    }

    let caller = Location::caller();
    let mut fields = Vec::with_capacity(args.len() / 2 + additional.len());

    let mut i = 0;
    while i < args.len() {
        if let Arg::Field(ref typed) = args[i] {
            engine.write(
                LogLevel::DPanic,
                "strongly-typed field passed as a key-value argument",
                &[Field::new("typed field", typed.to_string())],
                Some(caller),
            );
            break;
        }

        if i == args.len() - 1 {
            engine.write(
                LogLevel::DPanic,
                "odd number of arguments passed as key-value pairs for logging",
                &[Field::new("ignored key", arg_value(&args[i]))],
                Some(caller),
            );
            break;
        }

        let key = match &args[i] {
            Arg::Value(FieldValue::String(key)) => key,
            other => {
                engine.write(
                    LogLevel::DPanic,
                    "non-string key argument passed to logging, ignoring all later arguments",
                    &[Field::new("invalid key", arg_value(other))],
                    Some(caller),
                );
                break;
            }
        };

        fields.push(Field::new(key.clone(), arg_value(&args[i + 1])));
        i += 2;
    }

    fields.extend_from_slice(additional);
    fields
}

fn arg_value(arg: &Arg) -> FieldValue {
    match arg {
        Arg::Value(value) => value.clone(),
        Arg::Field(field) => FieldValue::String(field.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv;
    use crate::sinks::MemorySink;

    fn engine(sink: &MemorySink) -> Engine {
        Engine::builder()
            .min_level(LogLevel::Debug)
            .format(crate::core::Format::Json)
            .sink(sink.clone())
            .build()
    }

    #[test]
    fn test_pairs_convert_in_order() {
        let sink = MemorySink::new();
        let fields = handle_fields(&engine(&sink), &kv!["a", "1", "b", 2, "c", true], &[]);

        assert_eq!(
            fields,
            vec![
                Field::new("a", "1"),
                Field::new("b", 2),
                Field::new("c", true)
            ]
        );
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn test_odd_arguments_warn_and_truncate() {
        let sink = MemorySink::new();
        let fields = handle_fields(&engine(&sink), &kv!["a"], &[]);

        assert!(fields.is_empty());
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["level"], "DPANIC");
        assert_eq!(parsed["ignored key"], "a");
    }

    #[test]
    fn test_non_string_key_keeps_earlier_pairs() {
        let sink = MemorySink::new();
        let fields = handle_fields(&engine(&sink), &kv!["a", 1, 42, "x", "b", 2], &[]);

        assert_eq!(fields, vec![Field::new("a", 1)]);
        assert!(sink.contents().contains("non-string key"));
        assert!(sink.contents().contains("\"invalid key\":42"));
    }

    #[test]
    fn test_typed_field_stops_conversion() {
        let sink = MemorySink::new();
        let args = [Arg::from("a"), Arg::from(1), Arg::from(Field::new("t", "v"))];
        let fields = handle_fields(&engine(&sink), &args, &[]);

        assert_eq!(fields, vec![Field::new("a", 1)]);
        assert!(sink.contents().contains("strongly-typed field"));
    }

    #[test]
    fn test_diagnostic_survives_error_threshold() {
        let sink = MemorySink::new();
        let engine = Engine::builder()
            .min_level(LogLevel::Error)
            .format(crate::core::Format::Json)
            .sink(sink.clone())
            .build();
        let logger = crate::Logger::from_engine(engine);

        logger.errorw("m", &kv!["a"]);

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        let diagnostic: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(diagnostic["level"], "DPANIC");
        assert_eq!(diagnostic["ignored key"], "a");
        let record: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(record["level"], "ERROR");
        assert_eq!(record["message"], "m");
    }

    #[test]
    fn test_additional_fields_always_appended() {
        let sink = MemorySink::new();
        let extra = [Field::new("extra", "yes")];

        let fields = handle_fields(&engine(&sink), &kv!["a"], &extra);
        assert_eq!(fields, vec![Field::new("extra", "yes")]);

        let fields = handle_fields(&engine(&sink), &kv![], &extra);
        assert_eq!(fields, vec![Field::new("extra", "yes")]);
    }
}
