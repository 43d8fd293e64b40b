//! Property-based tests for the stream definition parser.
//!
//! - Canonical text produced by `Display` parses back to the same topology.
//! - Whenever parsing fails past the first module, the prefix carried by the
//!   error parses on its own.
//! - Parsing arbitrary text never panics and always reports a checkpoint
//!   inside the input.

use proptest::prelude::*;
use streamdsl::syntax::{ModuleDefinition, StreamDefinition, parse};

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}"
}

/// Values mixing characters that need quoting with ones that do not.
fn arb_value() -> impl Strategy<Value = String> {
    r#"[a-zA-Z0-9 .:_*'"|=>\\-]{0,8}"#
}

fn arb_module() -> impl Strategy<Value = ModuleDefinition> {
    (
        arb_name(),
        proptest::option::of(arb_name()),
        proptest::collection::vec((arb_name(), arb_value()), 0..3),
    )
        .prop_map(|(name, label, parameters)| {
            let mut module = ModuleDefinition::new(name);
            if let Some(label) = label {
                module = module.with_label(label);
            }
            for (key, value) in parameters {
                module = module.with_parameter(key, value);
            }
            module
        })
}

fn arb_stream() -> impl Strategy<Value = StreamDefinition> {
    (
        proptest::option::of(arb_name()),
        proptest::collection::vec(arb_module(), 1..4),
        proptest::option::of(arb_name()),
    )
        .prop_map(|(source, modules, sink)| StreamDefinition {
            name: Default::default(),
            raw_dsl: String::new(),
            modules,
            source_destination: source.map(Into::into),
            sink_destination: sink.map(Into::into),
        })
}

/// Short inputs over the DSL's own punctuation.
fn arb_dsl_like() -> impl Strategy<Value = String> {
    r#"[a-c :|=>'\\-]{0,20}"#
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_display_parses_back(stream in arb_stream()) {
        let text = stream.to_string();
        let reparsed = parse(&text);
        prop_assert!(reparsed.is_ok(), "{text:?} failed: {:?}", reparsed.err());
        let reparsed = reparsed.unwrap();
        prop_assert!(reparsed.same_topology(&stream), "{text:?} -> {reparsed}");
    }

    #[test]
    fn prop_truncated_prefix_reparses(stream in arb_stream(), cut in 0usize..200) {
        let text = stream.to_string();
        let cut = cut.min(text.len());
        let truncated = &text[..cut];

        if let Err(error) = parse(truncated) {
            prop_assert!(truncated.starts_with(error.partial_dsl()));
            if error.offset_of_checkpoint() > 0 {
                prop_assert!(
                    parse(error.partial_dsl()).is_ok(),
                    "prefix {:?} of {truncated:?} does not parse",
                    error.partial_dsl()
                );
            }
        }
    }

    #[test]
    fn prop_failures_keep_reparseable_prefix(dsl in arb_dsl_like()) {
        if let Err(error) = parse(&dsl) {
            prop_assert!(error.offset_of_checkpoint() <= dsl.len());
            prop_assert_eq!(error.partial_dsl(), &dsl[..error.offset_of_checkpoint()]);
            if error.offset_of_checkpoint() > 0 {
                prop_assert!(parse(error.partial_dsl()).is_ok());
            }
        }
    }

    #[test]
    fn prop_printable_input_never_panics(dsl in "[ -~]{0,24}") {
        match parse(&dsl) {
            Ok(stream) => prop_assert!(!stream.modules.is_empty()),
            Err(error) => prop_assert!(error.offset_of_checkpoint() <= dsl.len()),
        }
    }
}

// ============================================================================
// EXAMPLES
// ============================================================================

#[test]
fn test_simple_pipeline() {
    let stream = parse("time | log").unwrap();
    assert_eq!(
        stream.modules,
        vec![ModuleDefinition::new("time"), ModuleDefinition::new("log")]
    );
    assert!(stream.source_destination.is_none());
    assert!(stream.sink_destination.is_none());
}

#[test]
fn test_canonical_text() {
    let stream = parse(":in>a: filter --expression='x > 1'|log > :out").unwrap();
    assert_eq!(
        stream.to_string(),
        ":in > a: filter --expression='x > 1' | log > :out"
    );
}

#[test]
fn test_error_display_has_position() {
    let error = parse("time |\n  | log").unwrap_err();
    let message = error.to_string();
    assert!(message.ends_with("at 2:3"), "{message}");
}
