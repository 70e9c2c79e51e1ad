//! Pure questions asked of the object model: part type kind, binding style,
//! encoding use and SOAP action.

use crate::{naming::lowerlize, types::Context};
use soapstub_wsdl::types::{Binding, BindingKind, Header, OperationBinding, Part, PartType, Style, Use};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Builtin,
    Complex,
    Void,
}

/// A message part with everything the generator needs to know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartInfo {
    /// Name as declared in the message, used on the wire.
    pub name: String,
    /// Escaped identifier used for parameters and signal arguments.
    pub argument: String,
    pub local_type: String,
    pub input_type: String,
    pub kind: TypeKind,
}

pub fn type_kind(context: &Context<'_>, ty: &PartType) -> TypeKind {
    if context.types.is_void(ty) {
        TypeKind::Void
    } else if context.types.is_complex_type(ty) {
        TypeKind::Complex
    } else {
        TypeKind::Builtin
    }
}

pub fn part(context: &Context<'_>, part: &Part) -> PartInfo {
    PartInfo {
        name: part.name.clone(),
        argument: context.names.escape(&lowerlize(&part.name)),
        local_type: context.types.local_type(&part.ty),
        input_type: context.types.local_input_type(&part.ty),
        kind: type_kind(context, &part.ty),
    }
}

pub fn style(binding: &Binding) -> Style {
    match &binding.kind {
        BindingKind::Soap(soap) => soap.style,
        BindingKind::Other { .. } => Style::Rpc,
    }
}

fn operation_binding<'a>(binding: &'a Binding, operation: &str) -> Option<&'a OperationBinding> {
    binding
        .soap()
        .and_then(|soap| soap.operations.get(operation))
}

pub fn input_use(binding: &Binding, operation: &str) -> Use {
    match operation_binding(binding, operation) {
        Some(OperationBinding {
            input_use: Use::Encoded,
            ..
        }) => Use::Encoded,
        _ => Use::Literal,
    }
}

pub fn action<'a>(binding: &'a Binding, operation: &str) -> Option<&'a str> {
    operation_binding(binding, operation)
        .and_then(|op| op.action.as_deref())
        .filter(|action| !action.is_empty())
}

pub fn has_action(binding: &Binding, operation: &str) -> bool {
    action(binding, operation).is_some()
}

pub fn input_headers<'a>(binding: &'a Binding, operation: &str) -> &'a [Header] {
    operation_binding(binding, operation)
        .map(|op| op.input_headers.as_slice())
        .unwrap_or_default()
}
