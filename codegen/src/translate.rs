//! Lowers one port type operation into the methods and signals of the client class.
//!
//! | kind             | blocking call | async call       | completion pair |
//! |------------------|---------------|------------------|-----------------|
//! | one-way          |               | without watcher  |                 |
//! | request-response | yes           | with watcher     | yes             |
//! | solicit-response |               | with watcher     | yes (first)     |
//! | notification     |               |                  | yes             |

use crate::{
    builder::ClassBuilder,
    classify::{self, PartInfo, TypeKind},
    error::Error,
    ir::{Argument, FunctionKind, GeneratedFunction, Statement, ValueSource, MESSAGE_TYPE, WATCHER_TYPE},
    marshal,
    naming::{lowerlize, upperlize},
    types::Context,
};
use soapstub_wsdl::types::{Binding, Message, NamespacedName, Operation, OperationKind};

pub fn blocking_name(context: &Context<'_>, operation: &str) -> String {
    context.names.escape(&lowerlize(operation))
}

pub fn async_name(context: &Context<'_>, operation: &str) -> String {
    context.names.escape(&format!("async{}", upperlize(operation)))
}

pub fn success_signal_name(context: &Context<'_>, operation: &str) -> String {
    context.names.escape(&format!("{}Done", lowerlize(operation)))
}

pub fn failure_signal_name(context: &Context<'_>, operation: &str) -> String {
    context.names.escape(&format!("{}Error", lowerlize(operation)))
}

pub fn callback_name(context: &Context<'_>, operation: &str) -> String {
    context.names.escape(&format!("handle{}Reply", upperlize(operation)))
}

pub fn translate_operation(
    context: &Context<'_>,
    binding: &Binding,
    operation: &Operation,
    builder: &mut ClassBuilder,
) -> Result<(), Error> {
    let input = parts(context, operation, operation.input.as_ref())?;
    let output = parts(context, operation, operation.output.as_ref())?;

    tracing::debug!(operation = %operation.name, kind = ?operation.kind, "translating operation");

    match operation.kind {
        OperationKind::OneWay => {
            add_async_call(context, binding, operation, &input, false, builder);
        }

        OperationKind::RequestResponse => {
            add_blocking_call(context, binding, operation, &input, &output, builder);
            add_async_call(context, binding, operation, &input, true, builder);
            add_completion(context, binding, operation, &output, builder);
        }

        OperationKind::SolicitResponse => {
            add_completion(context, binding, operation, &output, builder);
            add_async_call(context, binding, operation, &input, true, builder);
        }

        OperationKind::Notification => {
            add_completion(context, binding, operation, &output, builder);
        }
    }

    Ok(())
}

fn find_message<'a>(
    context: &Context<'a>,
    operation: &Operation,
    name: &NamespacedName,
) -> Result<&'a Message, Error> {
    context
        .definition
        .find_message(name)
        .ok_or_else(|| Error::UnknownMessage {
            referrer: format!("Operation {}", operation.name),
            message: name.name.clone(),
        })
}

fn parts(
    context: &Context<'_>,
    operation: &Operation,
    message: Option<&NamespacedName>,
) -> Result<Vec<PartInfo>, Error> {
    match message {
        Some(name) => Ok(find_message(context, operation, name)?
            .parts
            .iter()
            .map(|part| classify::part(context, part))
            .collect()),
        None => Ok(Vec::new()),
    }
}

fn values(parts: &[PartInfo]) -> impl Iterator<Item = &PartInfo> {
    parts.iter().filter(|part| part.kind != TypeKind::Void)
}

fn input_arguments(parts: &[PartInfo]) -> Vec<Argument> {
    values(parts)
        .map(|part| Argument::new(part.argument.clone(), part.input_type.clone()))
        .collect()
}

fn request(binding: &Binding, operation: &Operation, input: &[PartInfo]) -> Vec<Statement> {
    marshal::request(
        classify::style(binding),
        classify::input_use(binding, &operation.name),
        input,
    )
}

fn action(binding: &Binding, operation: &Operation) -> Option<String> {
    classify::action(binding, &operation.name).map(ToOwned::to_owned)
}

fn add_blocking_call(
    context: &Context<'_>,
    binding: &Binding,
    operation: &Operation,
    input: &[PartInfo],
    output: &[PartInfo],
    builder: &mut ClassBuilder,
) {
    let name = blocking_name(context, &operation.name);
    let mut body = request(binding, operation, input);

    body.push(Statement::Call {
        operation: operation.name.clone(),
        action: action(binding, operation),
    });

    let results: Vec<_> = values(output).collect();
    if results.len() > 1 {
        builder.diagnose(
            &operation.name,
            format!(
                "{} declares {} return values but the blocking {}() only returns the first; use {}() to receive all of them",
                operation.name,
                results.len(),
                name,
                async_name(context, &operation.name),
            ),
        );
    }

    let mut function = GeneratedFunction::new(name, FunctionKind::Public)
        .with_arguments(input_arguments(input))
        .with_docs(format!(
            "Blocking call to {}.\nDoes not return until the reply or a fault has been received.",
            operation.name
        ));

    match results.first() {
        Some(result) => {
            body.push(Statement::ReturnIfFault {
                default: Some(result.local_type.clone()),
            });
            body.extend(
                marshal::incoming(classify::style(binding), result, ValueSource::First)
                    .map(Statement::Return),
            );

            function = function.returning(result.local_type.clone());
            builder.depend_on_parts(results.first().copied());
        }

        None => body.push(Statement::ReturnIfFault { default: None }),
    }

    builder.depend_on_parts(input);
    builder.add_function(function.with_body(body));
}

fn add_async_call(
    context: &Context<'_>,
    binding: &Binding,
    operation: &Operation,
    input: &[PartInfo],
    watch: bool,
    builder: &mut ClassBuilder,
) {
    let mut body = request(binding, operation, input);

    body.push(Statement::AsyncCall {
        operation: operation.name.clone(),
        action: action(binding, operation),
    });

    let docs = if watch {
        body.push(Statement::Watch {
            callback: callback_name(context, &operation.name),
        });

        format!(
            "Asynchronous call to {}.\nThe outcome is reported once, through {} or {}.",
            operation.name,
            success_signal_name(context, &operation.name),
            failure_signal_name(context, &operation.name),
        )
    } else {
        format!("Asynchronous call to {}.\nNo reply is expected.", operation.name)
    };

    builder.depend_on_parts(input);
    builder.add_function(
        GeneratedFunction::new(async_name(context, &operation.name), FunctionKind::Public)
            .with_arguments(input_arguments(input))
            .with_body(body)
            .with_docs(docs),
    );
}

fn add_completion(
    context: &Context<'_>,
    binding: &Binding,
    operation: &Operation,
    output: &[PartInfo],
    builder: &mut ClassBuilder,
) {
    let style = classify::style(binding);
    let success = success_signal_name(context, &operation.name);
    let failure = failure_signal_name(context, &operation.name);

    let success_signal = GeneratedFunction::new(success.clone(), FunctionKind::Signal)
        .with_arguments(
            values(output)
                .map(|part| Argument::new(part.argument.clone(), part.local_type.clone()))
                .collect(),
        )
        .with_docs(format!(
            "Emitted when a call to {} succeeded.",
            operation.name
        ));

    let failure_signal = GeneratedFunction::new(failure.clone(), FunctionKind::Signal)
        .with_argument(Argument::new("fault", MESSAGE_TYPE))
        .with_docs(format!("Emitted when a call to {} failed.", operation.name));

    let values = values(output)
        .filter_map(|part| marshal::incoming(style, part, ValueSource::Named(part.name.clone())))
        .collect();

    let callback = GeneratedFunction::new(callback_name(context, &operation.name), FunctionKind::Slot)
        .with_argument(Argument::new("watcher", WATCHER_TYPE))
        .with_body(vec![Statement::Complete {
            success,
            failure,
            values,
        }]);

    builder.depend_on_parts(output);
    builder.add_function(success_signal);
    builder.add_function(failure_signal);
    builder.add_function(callback);
}
