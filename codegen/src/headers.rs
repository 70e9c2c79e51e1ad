use crate::{
    builder::ClassBuilder,
    classify,
    error::Error,
    ir::{Argument, FunctionKind, GeneratedFunction, Statement},
    marshal,
    naming::upperlize,
    types::Context,
};
use soapstub_wsdl::types::{Binding, Header, Operation};

/// The distinct headers of one binding, in the order they were first referenced.
#[derive(Debug, Default)]
pub struct HeaderSet<'a> {
    headers: Vec<&'a Header>,
}

impl<'a> HeaderSet<'a> {
    pub fn collect(binding: &'a Binding, operations: &[Operation]) -> Self {
        let mut set = Self::default();

        for operation in operations {
            for header in classify::input_headers(binding, &operation.name) {
                set.insert(header);
            }
        }

        set
    }

    /// Returns false when a header with the same message and part is already known.
    pub fn insert(&mut self, header: &'a Header) -> bool {
        if self.headers.iter().any(|known| known.key() == header.key()) {
            return false;
        }

        self.headers.push(header);
        true
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Header> + '_ {
        self.headers.iter().copied()
    }
}

pub fn setter_name(context: &Context<'_>, part: &str) -> String {
    let name = upperlize(part);

    if name.ends_with("Header") {
        context.names.escape(&format!("set{}", name))
    } else {
        context.names.escape(&format!("set{}Header", name))
    }
}

pub fn emit_setters(
    context: &Context<'_>,
    binding: &Binding,
    headers: &HeaderSet<'_>,
    builder: &mut ClassBuilder,
) -> Result<(), Error> {
    let style = classify::style(binding);

    for header in headers.iter() {
        let message = context
            .definition
            .find_message(&header.message)
            .ok_or_else(|| Error::UnknownMessage {
                referrer: format!("Header {}", header.part),
                message: header.message.name.clone(),
            })?;

        let part = message
            .part_by_name(&header.part)
            .ok_or_else(|| Error::UnknownPart {
                message: message.name.name.clone(),
                part: header.part.clone(),
            })?;

        let info = classify::part(context, part);
        let name = setter_name(context, &part.name);

        tracing::debug!(header = %part.name, setter = %name, "emitting header setter");

        let mut body = vec![Statement::NewMessage { use_: header.use_ }];
        body.extend(marshal::outgoing(style, &info).map(Statement::Marshal));
        body.push(Statement::InstallHeader {
            name: part.name.clone(),
        });

        let mut setter = GeneratedFunction::new(name, FunctionKind::Public)
            .with_body(body)
            .with_docs(format!(
                "Sets the {} header sent with every following call.",
                part.name
            ));

        if info.kind != classify::TypeKind::Void {
            setter = setter.with_argument(Argument::new(info.argument.clone(), info.input_type.clone()));
        }

        builder.depend_on_parts(Some(&info));
        builder.add_function(setter);
    }

    Ok(())
}
