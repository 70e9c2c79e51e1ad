use crate::naming::{upperlize, NameMapper, RustNameMapper};
use soapstub_wsdl::types::{NamespacedName, Namespaces, PartType};

pub const VOID_TYPE: &str = "()";

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Maps schema types and elements onto target type names.
pub trait TypeMapper {
    /// Spelling used for return values, members and signal arguments.
    fn local_type(&self, ty: &PartType) -> String;

    /// Spelling used for method parameters.
    fn local_input_type(&self, ty: &PartType) -> String;

    fn is_builtin_type(&self, ty: &NamespacedName) -> bool;

    /// Whether the type maps onto a generated value class.
    fn is_complex_type(&self, ty: &PartType) -> bool {
        match ty {
            PartType::Type(name) => !self.is_builtin_type(name),
            PartType::Element(_) => true,
        }
    }

    fn is_void(&self, ty: &PartType) -> bool {
        self.local_type(ty) == VOID_TYPE
    }
}

fn builtin_type(name: &str) -> Option<&'static str> {
    match name {
        "boolean" => Some("bool"),
        "byte" => Some("i8"),
        "short" => Some("i16"),
        "int" => Some("i32"),
        "long" | "integer" => Some("i64"),
        "unsignedByte" => Some("u8"),
        "unsignedShort" => Some("u16"),
        "unsignedInt" => Some("u32"),
        "unsignedLong" => Some("u64"),
        "float" => Some("f32"),
        "double" | "decimal" => Some("f64"),
        "string" | "normalizedString" | "token" | "anyURI" | "QName" | "date" | "time"
        | "dateTime" | "duration" => Some("String"),
        "base64Binary" | "hexBinary" => Some("Vec<u8>"),
        _ => None,
    }
}

/// Default mapper: XML Schema builtins become Rust primitives, everything else a value class.
#[derive(Debug, Clone)]
pub struct XsdTypeMap {
    namespaces: Namespaces,
    void: Vec<NamespacedName>,
    names: RustNameMapper,
}

impl XsdTypeMap {
    pub fn new(namespaces: &Namespaces) -> Self {
        Self {
            namespaces: namespaces.clone(),
            void: Vec::new(),
            names: RustNameMapper,
        }
    }

    /// Marks a type or element that carries no value, such as an empty wrapper element.
    pub fn with_void(mut self, name: NamespacedName) -> Self {
        self.void.push(name);
        self
    }

    fn builtin(&self, name: &NamespacedName) -> Option<&'static str> {
        if self.namespaces.namespace_of(name) == Some(XSD_NAMESPACE) {
            builtin_type(&name.name)
        } else {
            None
        }
    }
}

impl TypeMapper for XsdTypeMap {
    fn local_type(&self, ty: &PartType) -> String {
        let name = ty.name();

        if self.void.contains(name) {
            return VOID_TYPE.to_owned();
        }

        match ty {
            PartType::Type(name) => match self.builtin(name) {
                Some(builtin) => builtin.to_owned(),
                None => self.names.escape(&upperlize(&name.name)),
            },
            PartType::Element(name) => self.names.escape(&upperlize(&name.name)),
        }
    }

    fn local_input_type(&self, ty: &PartType) -> String {
        let local = self.local_type(ty);

        if local == VOID_TYPE || matches!(ty, PartType::Type(name) if self.is_builtin_type(name)) {
            local
        } else {
            format!("&{}", local)
        }
    }

    fn is_builtin_type(&self, ty: &NamespacedName) -> bool {
        self.builtin(ty).is_some()
    }
}
