//! Shared command fixtures for parser and behaviour tests.

use std::sync::Arc;

use crate::{
    CommandBuilder, CommandDescriptor, CommandMap, CommandParser, ModuleBuilder,
    ParameterBuilder, TypeConverterRegistry,
};

pub(super) fn command(name: &str) -> Arc<CommandDescriptor> {
    Arc::new(CommandBuilder::new(name).build().expect("valid command"))
}

/// A module mirroring the usual parameter shapes, one command per shape.
pub(super) fn parameter_shapes() -> CommandMap {
    let commands = [
        CommandBuilder::new("no_params").alias("no_params"),
        CommandBuilder::new("required_param")
            .alias("required_param")
            .parameter(ParameterBuilder::new::<i32>("param")),
        CommandBuilder::new("multiple_required_params")
            .alias("multiple_required_params")
            .parameter(ParameterBuilder::new::<i32>("param"))
            .parameter(ParameterBuilder::new::<i64>("other_param")),
        CommandBuilder::new("quoted_params")
            .alias("quoted_params")
            .parameter(ParameterBuilder::new::<String>("param1"))
            .parameter(ParameterBuilder::new::<i32>("param2")),
        CommandBuilder::new("an_array_of_params")
            .alias("an_array_of_params")
            .parameter(ParameterBuilder::new::<i32>("parameters").variadic()),
        CommandBuilder::new("optional_param")
            .alias("optional_param")
            .parameter(ParameterBuilder::new::<i32>("spooky").with_default(5_i32)),
        CommandBuilder::new("multiple_optional_params")
            .alias("multiple_optional_params")
            .parameter(ParameterBuilder::new::<i32>("really").with_default(1337_i32))
            .parameter(ParameterBuilder::new::<i64>("spooky").with_default(5_i64)),
        CommandBuilder::new("remainder_param")
            .alias("remainder_param")
            .parameter(ParameterBuilder::new::<String>("message").remainder()),
        CommandBuilder::new("remainder_optional_param")
            .alias("remainder_optional_param")
            .parameter(
                ParameterBuilder::new::<String>("message")
                    .remainder()
                    .with_default(String::from("nerds")),
            ),
    ];

    let module = commands
        .into_iter()
        .fold(ModuleBuilder::new("parser_tests"), |module, builder| {
            module.command(builder.build().expect("valid command"))
        })
        .build()
        .expect("valid module");
    CommandMap::from_modules([&module]).expect("registrable module")
}

pub(super) fn parser() -> CommandParser<TypeConverterRegistry> {
    CommandParser::new(parameter_shapes(), TypeConverterRegistry::new())
}
