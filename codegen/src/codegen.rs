use crate::{
    builder::ClassBuilder,
    error::Error,
    headers::{self, HeaderSet},
    ir::{
        Argument, BaseType, Diagnostic, FunctionKind, GeneratedClass, GeneratedFunction,
        MemberVariable, Statement, ENDPOINT_MEMBER, LAST_REPLY_MEMBER, MESSAGE_TYPE,
        TRANSPORT_MEMBER, TRANSPORT_TYPE,
    },
    naming::upperlize,
    order, preprocessor, translate,
    types::{Context, Port},
};
use soapstub_wsdl::types::{Service, SoapVersion};
use std::collections::BTreeSet;

#[derive(Debug, Default, Clone)]
pub struct Options {
    /// Service to generate a client for. The first service is used when unset.
    pub service: Option<String>,
}

#[derive(Debug)]
pub struct Generated {
    /// Classes in emission order.
    pub classes: Vec<GeneratedClass>,
    pub diagnostics: Vec<Diagnostic>,
}

fn select_service<'a>(context: &Context<'a>, options: &Options) -> Result<&'a Service, Error> {
    let service = match &options.service {
        Some(name) => context
            .definition
            .find_service(name)
            .ok_or_else(|| Error::UnknownService(name.clone()))?,
        None => context.definition.services.first().ok_or(Error::NoService)?,
    };

    if service.name.name.is_empty() {
        return Err(Error::UnnamedService);
    }

    Ok(service)
}

fn add_scaffolding(builder: &mut ClassBuilder, ports: &[Port<'_>], namespace: &str) {
    builder.add_member(
        MemberVariable::new(TRANSPORT_MEMBER, format!("Option<{}>", TRANSPORT_TYPE))
            .with_initializer("None"),
    );
    builder.add_member(MemberVariable::new(LAST_REPLY_MEMBER, MESSAGE_TYPE));
    builder.add_member(MemberVariable::new(ENDPOINT_MEMBER, "String"));

    builder.add_function(GeneratedFunction::new("new", FunctionKind::Constructor));
    builder.add_function(
        GeneratedFunction::new("drop", FunctionKind::Destructor)
            .with_body(vec![Statement::ReleaseTransport]),
    );

    builder.add_function(
        GeneratedFunction::new("setEndPoint", FunctionKind::Public)
            .with_argument(Argument::new("endpoint", "String"))
            .with_body(vec![Statement::SetEndpoint {
                argument: "endpoint".into(),
            }])
            .with_docs(
                "Overrides the endpoint declared in the service description.\nAn empty value restores the declared endpoint.",
            ),
    );

    builder.add_function(
        GeneratedFunction::new("lastError", FunctionKind::Public)
            .returning("String")
            .constant()
            .with_body(vec![Statement::ReturnLastError])
            .with_docs("Fault of the last blocking call, or an empty string if it succeeded."),
    );

    // The first port fixes the version; the endpoint comes from the first port that declares one.
    let version = ports
        .first()
        .map_or(SoapVersion::Soap11, |port| port.soap.version);
    let default_endpoint = ports
        .iter()
        .find_map(|port| port.soap.address.as_ref())
        .map(ToString::to_string);

    builder.add_function(
        GeneratedFunction::new(TRANSPORT_MEMBER, FunctionKind::Private)
            .returning(TRANSPORT_TYPE)
            .with_body(vec![Statement::EnsureTransport {
                default_endpoint,
                namespace: namespace.to_owned(),
                version,
            }]),
    );
}

/// Lowers the selected service of the definition into a client class.
///
/// `value_classes` are the classes generated for the schema types; they are
/// returned together with the client class, sorted by dependency.
pub fn convert_client_service(
    context: &Context<'_>,
    options: &Options,
    value_classes: Vec<GeneratedClass>,
) -> Result<Generated, Error> {
    let service = select_service(context, options)?;
    let name = context.names.escape(&upperlize(&service.name.name));

    tracing::debug!(service = %service.name.name, class = %name, "converting service");

    let mut builder = ClassBuilder::new(name, BaseType::ServiceClient);
    builder.set_docs(
        service
            .documentation
            .clone()
            .unwrap_or_else(|| format!("Client for the {} service.", service.name.name)),
    );

    let ports = preprocessor::resolve_ports(context.definition, service)?;
    add_scaffolding(&mut builder, &ports, &context.definition.target_namespace);

    let mut generated_port_types = BTreeSet::new();

    for port in &ports {
        if !generated_port_types.insert(&port.port_type.name) {
            builder.diagnose(
                &port.port.name.name,
                format!(
                    "port type {} is already generated from another port; skipping binding {}",
                    port.port_type.name.name, port.binding.name.name
                ),
            );
            continue;
        }

        tracing::debug!(port = %port.port.name.name, binding = %port.binding.name.name, "generating port");

        for operation in &port.port_type.operations {
            translate::translate_operation(context, port.binding, operation, &mut builder)?;
        }

        let headers = HeaderSet::collect(port.binding, &port.port_type.operations);
        headers::emit_setters(context, port.binding, &headers, &mut builder)?;
    }

    let (class, diagnostics) = builder.finish();

    let mut classes = value_classes;
    classes.push(class);

    Ok(Generated {
        classes: order::sort_by_dependencies(classes)?,
        diagnostics,
    })
}
