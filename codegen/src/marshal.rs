//! Shape of the code that moves one message part in or out of a SOAP message.
//!
//! Document style passes a complex part as the whole body; RPC style wraps every
//! part as a named argument. Builtin values are never serialized, whatever the
//! style. The encoding use only flags the message and never changes a shape.

use crate::{
    classify::{PartInfo, TypeKind},
    ir::{Incoming, Outgoing, Statement, ValueSource},
};
use soapstub_wsdl::types::{Style, Use};

pub fn outgoing(style: Style, part: &PartInfo) -> Option<Outgoing> {
    match (part.kind, style) {
        (TypeKind::Void, _) => None,

        (TypeKind::Builtin, _) => Some(Outgoing::RawArgument {
            part: part.name.clone(),
            argument: part.argument.clone(),
        }),

        (TypeKind::Complex, Style::Document) => Some(Outgoing::SerializeBody {
            argument: part.argument.clone(),
        }),

        (TypeKind::Complex, Style::Rpc) => Some(Outgoing::SerializedArgument {
            part: part.name.clone(),
            argument: part.argument.clone(),
        }),
    }
}

pub fn incoming(style: Style, part: &PartInfo, source: ValueSource) -> Option<Incoming> {
    match (part.kind, style) {
        (TypeKind::Void, _) => None,

        (TypeKind::Builtin, _) => Some(Incoming::Cast {
            source,
            ty: part.local_type.clone(),
        }),

        (TypeKind::Complex, Style::Document) => Some(Incoming::DeserializePayload {
            ty: part.local_type.clone(),
        }),

        (TypeKind::Complex, Style::Rpc) => Some(Incoming::Deserialize {
            source,
            ty: part.local_type.clone(),
        }),
    }
}

/// Builds a request message carrying `parts`.
pub fn request(style: Style, use_: Use, parts: &[PartInfo]) -> Vec<Statement> {
    let mut statements = vec![Statement::NewMessage { use_ }];

    statements.extend(
        parts
            .iter()
            .filter_map(|part| outgoing(style, part))
            .map(Statement::Marshal),
    );

    statements
}
