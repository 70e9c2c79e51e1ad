use std::collections::BTreeMap;
use url::Url;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Namespaces(Vec<String>);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedName {
    namespace_idx: usize,
    pub name: String,
}

/// A message part references either a schema type or a schema element, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartType {
    Type(NamespacedName),
    Element(NamespacedName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub ty: PartType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub name: NamespacedName,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    OneWay,
    RequestResponse,
    SolicitResponse,
    Notification,
}

/// Which of `<input>` / `<output>` appeared first inside a port type operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: String,
    pub documentation: Option<String>,
    pub kind: OperationKind,
    pub input: Option<NamespacedName>,
    pub output: Option<NamespacedName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortType {
    pub name: NamespacedName,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Rpc,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Use {
    Encoded,
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoapVersion {
    Soap11,
    Soap12,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub message: NamespacedName,
    pub part: String,
    pub use_: Use,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationBinding {
    pub action: Option<String>,
    pub input_use: Use,
    pub input_headers: Vec<Header>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBinding {
    pub version: SoapVersion,
    pub style: Style,
    pub address: Option<Url>,
    pub operations: BTreeMap<String, OperationBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    Soap(SoapBinding),
    /// Any non-SOAP binding, such as HTTP GET/POST.
    Other { transport: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: NamespacedName,
    pub port_type: NamespacedName,
    pub kind: BindingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: NamespacedName,
    pub binding: NamespacedName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: NamespacedName,
    pub documentation: Option<String>,
    pub ports: Vec<Port>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub target_namespace: String,
    pub messages: Vec<Message>,
    pub port_types: Vec<PortType>,
    pub bindings: Vec<Binding>,
    pub services: Vec<Service>,
}

impl Namespaces {
    pub fn namespaces(&self) -> &[String] {
        &self.0
    }

    pub fn add_or_get(&mut self, namespace: &str) -> usize {
        if let Some(index) = self.index_of(namespace) {
            index
        } else {
            let index = self.0.len();
            self.0.push(namespace.to_owned());
            index
        }
    }

    pub fn namespace_of(&self, name: &NamespacedName) -> Option<&str> {
        self.0.get(name.namespace_idx).map(String::as_str)
    }

    fn index_of(&self, namespace: &str) -> Option<usize> {
        self.0.iter().position(|value| value == namespace)
    }
}

impl NamespacedName {
    pub fn new(namespaces: &mut Namespaces, namespace: &str, name: impl Into<String>) -> Self {
        Self {
            namespace_idx: namespaces.add_or_get(namespace),
            name: name.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.namespace_idx
    }
}

impl PartType {
    pub fn name(&self) -> &NamespacedName {
        match self {
            PartType::Type(name) | PartType::Element(name) => name,
        }
    }
}

impl Message {
    pub fn part_by_name(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.name == name)
    }
}

impl OperationKind {
    pub fn from_order(first: Direction, has_input: bool, has_output: bool) -> Option<Self> {
        match (has_input, has_output) {
            (true, false) => Some(OperationKind::OneWay),
            (false, true) => Some(OperationKind::Notification),
            (true, true) => match first {
                Direction::Input => Some(OperationKind::RequestResponse),
                Direction::Output => Some(OperationKind::SolicitResponse),
            },
            (false, false) => None,
        }
    }
}

impl Default for Use {
    fn default() -> Self {
        Use::Literal
    }
}

impl Header {
    /// Identity used to deduplicate headers across the operations of a binding.
    pub fn key(&self) -> (&NamespacedName, &str) {
        (&self.message, &self.part)
    }
}

impl Default for OperationBinding {
    fn default() -> Self {
        Self {
            action: None,
            input_use: Use::Literal,
            input_headers: Vec::new(),
        }
    }
}

impl Binding {
    pub fn soap(&self) -> Option<&SoapBinding> {
        match &self.kind {
            BindingKind::Soap(soap) => Some(soap),
            BindingKind::Other { .. } => None,
        }
    }
}

impl Definition {
    pub fn find_message(&self, name: &NamespacedName) -> Option<&Message> {
        self.messages.iter().find(|message| message.name == *name)
    }

    pub fn find_port_type(&self, name: &NamespacedName) -> Option<&PortType> {
        self.port_types.iter().find(|port_type| port_type.name == *name)
    }

    pub fn find_binding(&self, name: &NamespacedName) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.name == *name)
    }

    pub fn find_service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.name.name == name)
    }
}
