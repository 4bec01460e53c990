//! Tests for [`CommandParser`] and argument binding.

use std::sync::Arc;
use std::thread;

use rstest::{fixture, rstest};

use super::support;
use crate::{
    Argument, ArgumentBinder, BindFailure, CommandBuilder, CommandMap, CommandParser,
    EmptyRegistry, ParameterBuilder, ParseError, QuotePairs, TokenizerFailureReason,
    TypeConverterRegistry, Value, ValueType,
};

#[fixture]
fn parser() -> CommandParser<TypeConverterRegistry> {
    support::parser()
}

#[rstest]
#[case("no_params", true)]
#[case("no_params but actually with params", true)]
#[case("required_param", false)]
#[case("required_param a", false)]
#[case("required_param 1", true)]
#[case("required_param 1 with extra", true)]
#[case("multiple_required_params", false)]
#[case("multiple_required_params a", false)]
#[case("multiple_required_params 1", false)]
#[case("multiple_required_params 1 a", false)]
#[case("multiple_required_params 1 2", true)]
#[case("multiple_required_params 1 2 and more", true)]
#[case("quoted_params abc 1", true)]
#[case("quoted_params oh no 1", false)]
#[case("quoted_params 'this works though' 1", true)]
#[case("an_array_of_params", true)]
#[case("an_array_of_params a", false)]
#[case("an_array_of_params 1", true)]
#[case("an_array_of_params 1 a", false)]
#[case("an_array_of_params 1 2", true)]
#[case("optional_param", true)]
#[case("optional_param a", false)]
#[case("optional_param 1", true)]
#[case("optional_param 1 a", true)]
#[case("multiple_optional_params", true)]
#[case("multiple_optional_params a", false)]
#[case("multiple_optional_params 1", true)]
#[case("multiple_optional_params 1 a", false)]
#[case("multiple_optional_params 1 2", true)]
#[case("multiple_optional_params 1 2 a", true)]
#[case("remainder_param", false)]
#[case("remainder_param a", true)]
#[case("remainder_param 'oh okay this should work'", true)]
#[case("remainder_param ok this should work too", true)]
#[case("remainder_optional_param", true)]
#[case("remainder_optional_param a", true)]
#[case("remainder_optional_param 'oh okay this should work'", true)]
#[case("remainder_optional_param ok this should work too", true)]
#[case("unknown_command", false)]
#[case("", false)]
fn parse_accepts_only_bindable_messages(
    parser: CommandParser<TypeConverterRegistry>,
    #[case] message: &str,
    #[case] succeeds: bool,
) {
    let outcome = parser.parse(message, 0);
    assert_eq!(outcome.is_ok(), succeeds, "{message}: {outcome:?}");
    if let Err(error) = outcome {
        assert!(error.is_not_found());
    }
}

#[rstest]
fn required_param_binds_integer(parser: CommandParser<TypeConverterRegistry>) {
    let parsed = parser.parse("required_param 1", 0).expect("parse");
    assert_eq!(parsed.command().name(), "required_param");
    assert_eq!(parsed.path(), ["required_param"]);
    assert_eq!(parsed.argument::<i32>(0), Some(&1));
}

#[rstest]
fn quoted_argument_is_dequoted(parser: CommandParser<TypeConverterRegistry>) {
    let parsed = parser
        .parse("quoted_params 'this works though' 1", 0)
        .expect("parse");
    assert_eq!(
        parsed.argument::<String>(0).map(String::as_str),
        Some("this works though")
    );
    assert_eq!(parsed.argument::<i32>(1), Some(&1));
}

#[rstest]
#[case("an_array_of_params 1 2", &[1, 2])]
#[case("an_array_of_params", &[])]
#[case("an_array_of_params '3' 4 5", &[3, 4, 5])]
fn variadic_collects_remaining_tokens(
    parser: CommandParser<TypeConverterRegistry>,
    #[case] message: &str,
    #[case] expected: &[i32],
) {
    let parsed = parser.parse(message, 0).expect("parse");
    let values = parsed
        .arguments()
        .first()
        .and_then(Argument::collect_variadic::<i32>)
        .expect("variadic argument");
    assert_eq!(values, expected);
}

#[rstest]
#[case("optional_param", 5, 5)]
#[case("optional_param 9", 9, 5)]
#[case("multiple_optional_params", 1337, 5)]
#[case("multiple_optional_params 1", 1, 5)]
#[case("multiple_optional_params 1 2", 1, 2)]
fn omitted_optional_parameters_take_defaults(
    parser: CommandParser<TypeConverterRegistry>,
    #[case] message: &str,
    #[case] first: i32,
    #[case] second: i64,
) {
    let parsed = parser.parse(message, 0).expect("parse");
    assert_eq!(parsed.argument::<i32>(0), Some(&first));
    if parsed.arguments().len() > 1 {
        assert_eq!(parsed.argument::<i64>(1), Some(&second));
    }
}

#[rstest]
#[case("remainder_param a", "a")]
#[case("remainder_param 'oh okay this should work'", "'oh okay this should work'")]
#[case("remainder_param ok this should work too", "ok this should work too")]
#[case("remainder_optional_param", "nerds")]
fn remainder_captures_source_verbatim(
    parser: CommandParser<TypeConverterRegistry>,
    #[case] message: &str,
    #[case] expected: &str,
) {
    let parsed = parser.parse(message, 0).expect("parse");
    assert_eq!(
        parsed.argument::<String>(0).map(String::as_str),
        Some(expected)
    );
}

#[test]
fn remainder_keeps_quotes_and_following_text() {
    let say = CommandBuilder::new("say")
        .alias("say")
        .parameter(ParameterBuilder::new::<String>("text").remainder())
        .build()
        .expect("valid command");
    let mut commands = CommandMap::new();
    commands
        .add_command(&["say"], Arc::new(say))
        .expect("register");
    let parser = CommandParser::new(commands, EmptyRegistry);

    let parsed = parser
        .parse("say 'hello world' and more", 0)
        .expect("parse");
    assert_eq!(
        parsed.argument::<String>(0).map(String::as_str),
        Some("'hello world' and more")
    );
}

#[rstest]
fn prefix_is_skipped(parser: CommandParser<TypeConverterRegistry>) {
    let parsed = parser.parse("!!required_param 7", 2).expect("parse");
    assert_eq!(parsed.argument::<i32>(0), Some(&7));
}

#[rstest]
#[case("required_param 'unterminated", TokenizerFailureReason::UnterminatedQuote)]
#[case("required_param '1'2", TokenizerFailureReason::UnexpectedCharacterAfterQuote)]
fn tokenizer_failures_pass_through(
    parser: CommandParser<TypeConverterRegistry>,
    #[case] message: &str,
    #[case] reason: TokenizerFailureReason,
) {
    let error = parser.parse(message, 0).expect_err("tokenizer failure");
    let ParseError::Tokenizer(failure) = &error else {
        panic!("expected tokenizer failure, got {error:?}");
    };
    assert_eq!(failure.reason(), reason);
    assert_eq!(failure.input(), message);
}

#[rstest]
fn long_messages_parse_by_default(parser: CommandParser<TypeConverterRegistry>) {
    let words = "x ".repeat(2100);
    let message = format!("remainder_param {}", words.trim_end());
    let parsed = parser.parse(&message, 0).expect("parse");
    assert_eq!(
        parsed.argument::<String>(0).map(String::len),
        Some(words.trim_end().len())
    );
}

#[rstest]
fn not_found_counts_rejected_candidates(parser: CommandParser<TypeConverterRegistry>) {
    let error = parser
        .parse("multiple_required_params 1 a", 0)
        .expect_err("unbindable");
    assert_eq!(error, ParseError::command_not_found(1));
}

#[test]
fn deeper_candidate_binds_when_shallower_fails() {
    let shallow = CommandBuilder::new("module")
        .parameter(ParameterBuilder::new::<u8>("level"))
        .build()
        .expect("valid command");
    let deep = CommandBuilder::new("module stats")
        .parameter(ParameterBuilder::new::<String>("target").with_default(String::new()))
        .build()
        .expect("valid command");
    let mut commands = CommandMap::new();
    commands
        .add_command(&["module"], Arc::new(shallow))
        .expect("register");
    commands
        .add_command(&["module", "stats"], Arc::new(deep))
        .expect("register");
    let parser = CommandParser::new(commands, EmptyRegistry);

    let parsed = parser.parse("module 3", 0).expect("shallow binds");
    assert_eq!(parsed.command().name(), "module");

    let parsed = parser.parse("module stats", 0).expect("deep binds");
    assert_eq!(parsed.command().name(), "module stats");
    assert_eq!(parsed.path(), ["module", "stats"]);
}

#[test]
fn shallower_candidate_wins_when_both_bind() {
    let shallow = CommandBuilder::new("echo")
        .parameter(ParameterBuilder::new::<String>("text").remainder())
        .build()
        .expect("valid command");
    let deep = CommandBuilder::new("echo loud")
        .build()
        .expect("valid command");
    let mut commands = CommandMap::new();
    commands
        .add_command(&["echo"], Arc::new(shallow))
        .expect("register");
    commands
        .add_command(&["echo", "loud"], Arc::new(deep))
        .expect("register");
    let parser = CommandParser::new(commands, EmptyRegistry);

    let parsed = parser.parse("echo loud", 0).expect("parse");
    assert_eq!(parsed.command().name(), "echo");
}

#[test]
fn registry_converters_take_precedence_over_builtins() {
    let command = CommandBuilder::new("hex")
        .alias("hex")
        .parameter(ParameterBuilder::new::<u32>("value"))
        .build()
        .expect("valid command");
    let mut commands = CommandMap::new();
    commands
        .add_command(&["hex"], Arc::new(command))
        .expect("register");
    let mut converters = TypeConverterRegistry::new();
    converters.register(|text: &str| u32::from_str_radix(text.trim_start_matches("0x"), 16).ok());
    let parser = CommandParser::new(commands, converters);

    let parsed = parser.parse("hex 0xff", 0).expect("parse");
    assert_eq!(parsed.argument::<u32>(0), Some(&255));
    let parsed = parser.parse("hex 10", 0).expect("parse");
    assert_eq!(parsed.argument::<u32>(0), Some(&16));
}

#[test]
fn converter_output_must_match_declared_type() {
    let command = Arc::new(
        CommandBuilder::new("n")
            .parameter(ParameterBuilder::new::<i32>("count"))
            .build()
            .expect("valid command"),
    );
    let mut commands = CommandMap::new();
    commands
        .add_command(&["n"], Arc::clone(&command))
        .expect("register");
    let mut converters = TypeConverterRegistry::new();
    converters.register_converter(ValueType::of::<i32>(), |text: &str| {
        Some(Value::new(text.to_owned()))
    });

    let quotes = QuotePairs::default();
    let binder = ArgumentBinder::new(&converters, &quotes);
    let candidate = commands.resolve(&["n", "5"]).next().expect("candidate");
    let failure = binder
        .bind("n 5", &[0..1, 2..3], &candidate)
        .expect_err("mistyped value");
    assert_eq!(
        failure,
        BindFailure::ConverterTypeMismatch {
            parameter: String::from("count"),
            expected: "i32",
            actual: ValueType::of::<String>().name(),
        }
    );

    let parser = CommandParser::new(commands, converters);
    let error = parser.parse("n 5", 0).expect_err("mistyped value");
    assert!(error.is_not_found());
}

#[test]
fn binder_reports_missing_converter() {
    let command = Arc::new(
        CommandBuilder::new("custom")
            .parameter(ParameterBuilder::new::<f64>("value"))
            .build()
            .expect("valid command"),
    );
    let mut commands = CommandMap::new();
    commands
        .add_command(&["custom"], Arc::clone(&command))
        .expect("register");
    let quotes = QuotePairs::default();
    let binder = ArgumentBinder::new(&EmptyRegistry, &quotes);
    let candidate = commands
        .resolve(&["custom", "x"])
        .next()
        .expect("candidate");

    let failure = binder
        .bind("custom x", &[0..6, 7..8], &candidate)
        .expect_err("no converter");
    assert!(matches!(failure, BindFailure::NoConverter { .. }));
}

#[test]
fn binder_reports_missing_and_unconvertible_arguments() {
    let command = Arc::new(
        CommandBuilder::new("pair")
            .parameter(ParameterBuilder::new::<i32>("first"))
            .parameter(ParameterBuilder::new::<i32>("second"))
            .build()
            .expect("valid command"),
    );
    let mut commands = CommandMap::new();
    commands
        .add_command(&["pair"], command)
        .expect("register");
    let quotes = QuotePairs::default();
    let binder = ArgumentBinder::new(&EmptyRegistry, &quotes);

    let candidate = commands.resolve(&["pair", "1"]).next().expect("candidate");
    let failure = binder
        .bind("pair 1", &[0..4, 5..6], &candidate)
        .expect_err("missing second");
    assert_eq!(
        failure,
        BindFailure::MissingArgument {
            parameter: String::from("second")
        }
    );

    let candidate = commands
        .resolve(&["pair", "1", "x"])
        .next()
        .expect("candidate");
    let failure = binder
        .bind("pair 1 x", &[0..4, 5..6, 7..8], &candidate)
        .expect_err("unconvertible second");
    assert!(matches!(
        failure,
        BindFailure::Unconvertible { ref text, .. } if text == "x"
    ));
}

#[test]
fn binder_rejects_ranges_outside_source() {
    let command = Arc::new(
        CommandBuilder::new("one")
            .parameter(ParameterBuilder::new::<String>("value"))
            .build()
            .expect("valid command"),
    );
    let mut commands = CommandMap::new();
    commands
        .add_command(&["one"], command)
        .expect("register");
    let quotes = QuotePairs::default();
    let binder = ArgumentBinder::new(&EmptyRegistry, &quotes);
    let candidate = commands.resolve(&["one", "two"]).next().expect("candidate");

    let failure = binder
        .bind("one", &[0..3, 4..7], &candidate)
        .expect_err("range past end");
    assert_eq!(failure, BindFailure::TokenOutOfBounds { start: 4, end: 7 });
}

#[test]
fn defaults_are_shared_values() {
    let default = Value::new(String::from("shared"));
    let command = Arc::new(
        CommandBuilder::new("greet")
            .parameter(ParameterBuilder::new::<String>("name").with_default_value(default))
            .build()
            .expect("valid command"),
    );
    let mut commands = CommandMap::new();
    commands
        .add_command(&["greet"], command)
        .expect("register");
    let parser = CommandParser::new(commands, EmptyRegistry);

    let parsed = parser.parse("greet", 0).expect("parse");
    assert_eq!(
        parsed.argument::<String>(0).map(String::as_str),
        Some("shared")
    );
}

#[test]
fn parser_is_shareable_across_threads() {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CommandMap>();
    assert_send_sync::<CommandParser<TypeConverterRegistry>>();
    assert_send_sync::<crate::parley_core::RangePool>();
}

#[test]
fn concurrent_parses_share_one_parser() {
    let parser = Arc::new(support::parser());
    let workers: Vec<_> = (0..8_i32)
        .map(|worker| {
            let shared = Arc::clone(&parser);
            thread::spawn(move || {
                for round in 0..50_i32 {
                    let message = format!("multiple_required_params {worker} {round}");
                    let parsed = shared.parse(&message, 0).expect("parse");
                    assert_eq!(parsed.argument::<i32>(0), Some(&worker));
                    assert_eq!(parsed.argument::<i64>(1), Some(&i64::from(round)));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker thread");
    }
}
