use quick_xml::{
    events::{attributes::Attributes, BytesStart, BytesText, Event},
    Reader,
};
use std::{
    collections::{BTreeMap, HashMap},
    io::{BufRead, BufReader},
};
use url::Url;

use super::{
    error,
    types::{
        Binding, BindingKind, Definition, Direction, Header, Message, NamespacedName, Namespaces,
        Operation, OperationBinding, OperationKind, Part, PartType, Port, PortType, Service,
        SoapBinding, SoapVersion, Style, Use,
    },
};

const SOAP11_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
const SOAP12_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";

fn get_attributes<B: BufRead, const N: usize>(
    reader: &Reader<B>,
    attributes: Attributes<'_>,
    names: [&'static str; N],
) -> Result<[Option<String>; N], error::Error> {
    const INIT: Option<String> = None;
    let mut result = [INIT; N];

    for attribute in attributes {
        let attribute = attribute?;
        let key = reader.decode(attribute.key)?;

        for (index, name) in names.iter().enumerate() {
            if key == *name {
                result[index] = Some(reader.decode(attribute.value.as_ref())?.to_owned());
                break;
            }
        }
    }

    Ok(result)
}

fn required(
    value: Option<String>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, error::Error> {
    value.ok_or(error::Error::MissingAttribute { element, attribute })
}

fn split_namespaced_name(prefixed_name: &str) -> (Option<&str>, &str) {
    match prefixed_name.split_once(':') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, prefixed_name),
    }
}

fn soap_version(namespace: Option<&str>) -> Option<SoapVersion> {
    match namespace {
        Some(SOAP11_NAMESPACE) => Some(SoapVersion::Soap11),
        Some(SOAP12_NAMESPACE) => Some(SoapVersion::Soap12),
        _ => None,
    }
}

fn parse_use(value: Option<&str>) -> Use {
    match value {
        Some("encoded") => Use::Encoded,
        _ => Use::Literal,
    }
}

fn parse_style(value: Option<&str>) -> Style {
    match value {
        Some("document") => Style::Document,
        _ => Style::Rpc,
    }
}

#[derive(Clone, Default)]
struct CurrentNamespaces {
    target: Vec<String>,
    namespaces: HashMap<Option<String>, String>,
}

struct Parser {
    root: Option<Url>,

    definition: Definition,
    namespaces: Namespaces,
    current_namespaces: CurrentNamespaces,
    addresses: Vec<(NamespacedName, String)>,
}

#[derive(Debug)]
enum ParseState {
    Definitions,

    Message {
        name: String,
        parts: Vec<Part>,
    },

    PortType {
        name: String,
        operations: Vec<Operation>,
    },
    Operation {
        name: String,
        documentation: Option<String>,
        first: Option<Direction>,
        input: Option<NamespacedName>,
        output: Option<NamespacedName>,
    },
    Documentation(Option<String>),

    Binding {
        name: String,
        port_type: NamespacedName,
        kind: Option<BindingKind>,
        operations: BTreeMap<String, OperationBinding>,
    },
    BindingOperation {
        name: String,
        binding: OperationBinding,
    },
    BindingInput {
        body_use: Option<Use>,
        headers: Vec<Header>,
    },

    Service {
        name: String,
        documentation: Option<String>,
        ports: Vec<Port>,
    },
    Port {
        name: String,
        binding: NamespacedName,
        address: Option<String>,
    },

    Other,
}

impl CurrentNamespaces {
    fn push_target_namespace(&mut self, namespace: String) {
        self.target.push(namespace);
    }

    fn pop_target_namespace(&mut self) {
        self.target.pop();
    }

    fn add_namespace_prefix(&mut self, prefix: Option<String>, namespace: &str) {
        self.namespaces.insert(prefix, namespace.to_owned());
    }

    fn target_namespaced(
        &self,
        namespaces: &mut Namespaces,
        name: String,
    ) -> Result<NamespacedName, error::Error> {
        match self.target.last() {
            Some(target) => Ok(NamespacedName::new(namespaces, target, name)),
            None => Err(error::Error::MissingTargetNamespace),
        }
    }

    fn resolved_prefix(
        &self,
        namespaces: &mut Namespaces,
        prefix: Option<&str>,
        name: &str,
    ) -> Result<NamespacedName, error::Error> {
        match self.namespaces.get(&prefix.map(ToOwned::to_owned)) {
            Some(value) => Ok(NamespacedName::new(namespaces, value, name)),
            None if prefix.is_none() => self.target_namespaced(namespaces, name.to_owned()),
            None => Err(error::Error::UnknownPrefix(format!(
                "{}:{}",
                prefix.unwrap_or_default(),
                name
            ))),
        }
    }
}

impl Parser {
    fn new(root: Option<Url>) -> Self {
        Self {
            root,

            definition: Default::default(),
            namespaces: Default::default(),
            current_namespaces: Default::default(),
            addresses: Vec::new(),
        }
    }

    fn push_target_namespace(&mut self, namespace: String) {
        self.current_namespaces.push_target_namespace(namespace);
    }

    fn pop_target_namespace(&mut self) {
        self.current_namespaces.pop_target_namespace();
    }

    fn add_namespace_prefix(&mut self, prefix: Option<String>, namespace: &str) {
        self.current_namespaces
            .add_namespace_prefix(prefix, namespace);
    }

    fn target_namespaced(&mut self, name: String) -> Result<NamespacedName, error::Error> {
        self.current_namespaces
            .target_namespaced(&mut self.namespaces, name)
    }

    fn resolve_namespace(&mut self, prefixed_name: &str) -> Result<NamespacedName, error::Error> {
        let (prefix, local_name) = split_namespaced_name(prefixed_name);

        match prefix {
            Some("tns") => self.target_namespaced(local_name.to_owned()),

            _ => self
                .current_namespaces
                .resolved_prefix(&mut self.namespaces, prefix, local_name),
        }
    }

    fn parse(mut self) -> Result<(Definition, Namespaces), error::Error> {
        if let Some(root) = self.root.clone() {
            self.parse_url(root)?;
        }

        self.attach_addresses();
        Ok((self.definition, self.namespaces))
    }

    fn parse_url(&mut self, url: Url) -> Result<(), error::Error> {
        tracing::debug!(%url, "reading WSDL document");

        let scheme = url.scheme().to_owned();
        match scheme.as_str() {
            "file" => self.parse_xml(
                Reader::from_file(
                    url.to_file_path()
                        .map_err(|()| error::Error::PathConversionError(None))?,
                )
                .map_err(error::Error::FileOpenError)?,
            ),

            "http" | "https" => self.parse_xml(Reader::from_reader(BufReader::new(
                reqwest::blocking::get(url)?,
            ))),

            other => Err(error::Error::UnsupportedScheme(other.into())),
        }
    }

    fn parse_xml<B: BufRead>(&mut self, mut reader: Reader<B>) -> Result<(), error::Error> {
        reader.trim_text(true);

        let mut stack = Vec::new();
        let mut buffer = Vec::new();
        let mut namespace_buffer = Vec::new();

        loop {
            buffer.clear();

            let (namespace, event) =
                reader.read_namespaced_event(&mut buffer, &mut namespace_buffer)?;
            let namespace = namespace.map(|ns| String::from_utf8_lossy(ns).into_owned());

            match event {
                Event::Start(start) => {
                    self.handle_start(&mut stack, &reader, &start, namespace.as_deref())?
                }
                Event::End(..) => self.handle_end(&mut stack)?,

                Event::Empty(start) => {
                    self.handle_start(&mut stack, &reader, &start, namespace.as_deref())?;
                    self.handle_end(&mut stack)?;
                }

                Event::Text(text) => self.handle_text(&mut stack, &reader, &text)?,

                Event::Eof => break,

                _ => (),
            }
        }

        Ok(())
    }

    fn handle_start<B: BufRead>(
        &mut self,
        stack: &mut Vec<ParseState>,
        reader: &Reader<B>,
        start: &BytesStart<'_>,
        namespace: Option<&str>,
    ) -> Result<(), error::Error> {
        let (_, local_name) = split_namespaced_name(reader.decode(start.name())?);

        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = reader.decode(attribute.key)?;
            let value = reader.decode(attribute.value.as_ref())?;

            match split_namespaced_name(key) {
                (Some("xmlns"), prefix) => self.add_namespace_prefix(Some(prefix.to_owned()), value),
                (None, "xmlns") => self.add_namespace_prefix(None, value),
                _ => (),
            }
        }

        let mut state = stack.pop();
        let mut new_state = ParseState::Other;

        match state {
            None => {
                if local_name == "definitions" {
                    let [namespace] =
                        get_attributes(reader, start.attributes(), ["targetNamespace"])?;
                    let namespace = namespace.ok_or(error::Error::MissingTargetNamespace)?;

                    if self.definition.target_namespace.is_empty() {
                        self.definition.target_namespace = namespace.clone();
                    }

                    self.push_target_namespace(namespace);
                    new_state = ParseState::Definitions;
                }
            }

            Some(ParseState::Definitions) => match local_name {
                "import" => {
                    let [location] = get_attributes(reader, start.attributes(), ["location"])?;
                    let location = required(location, "import", "location")?;

                    let url = match &self.root {
                        Some(root) => root.join(&location)?,
                        None => return Err(error::Error::RelativeImport(location)),
                    };

                    self.parse_url(url)?;
                }

                "message" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::Message {
                        name: required(name, "message", "name")?,
                        parts: Vec::new(),
                    };
                }

                "portType" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::PortType {
                        name: required(name, "portType", "name")?,
                        operations: Vec::new(),
                    };
                }

                "binding" => {
                    let [name, ty] = get_attributes(reader, start.attributes(), ["name", "type"])?;
                    let name = required(name, "binding", "name")?;
                    let port_type = self.resolve_namespace(&required(ty, "binding", "type")?)?;

                    new_state = ParseState::Binding {
                        name,
                        port_type,
                        kind: None,
                        operations: BTreeMap::new(),
                    };
                }

                "service" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::Service {
                        name: required(name, "service", "name")?,
                        documentation: None,
                        ports: Vec::new(),
                    };
                }

                _ => tracing::trace!("skipping <{}> inside definitions", local_name),
            },

            Some(ParseState::Message { ref mut parts, .. }) => {
                if local_name == "part" {
                    let [name, ty, element] =
                        get_attributes(reader, start.attributes(), ["name", "type", "element"])?;
                    let name = required(name, "part", "name")?;

                    let ty = match (ty, element) {
                        (Some(ty), _) => PartType::Type(self.resolve_namespace(&ty)?),
                        (None, Some(element)) => {
                            PartType::Element(self.resolve_namespace(&element)?)
                        }
                        (None, None) => {
                            return Err(error::Error::MissingAttribute {
                                element: "part",
                                attribute: "type",
                            })
                        }
                    };

                    parts.push(Part { name, ty });
                }
            }

            Some(ParseState::PortType { .. }) => {
                if local_name == "operation" {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::Operation {
                        name: required(name, "operation", "name")?,
                        documentation: None,
                        first: None,
                        input: None,
                        output: None,
                    };
                }
            }

            Some(ParseState::Operation {
                ref mut first,
                ref mut input,
                ref mut output,
                ..
            }) => match local_name {
                "documentation" => new_state = ParseState::Documentation(None),

                "input" | "output" => {
                    let (direction, element) = if local_name == "input" {
                        (Direction::Input, "input")
                    } else {
                        (Direction::Output, "output")
                    };

                    let [message] = get_attributes(reader, start.attributes(), ["message"])?;
                    let message = self.resolve_namespace(&required(message, element, "message")?)?;

                    first.get_or_insert(direction);
                    match direction {
                        Direction::Input => *input = Some(message),
                        Direction::Output => *output = Some(message),
                    }
                }

                _ => tracing::trace!("skipping <{}> inside operation", local_name),
            },

            Some(ParseState::Binding { ref mut kind, .. }) => match local_name {
                "binding" => {
                    if let Some(version) = soap_version(namespace) {
                        let [style] = get_attributes(reader, start.attributes(), ["style"])?;

                        *kind = Some(BindingKind::Soap(SoapBinding {
                            version,
                            style: parse_style(style.as_deref()),
                            address: None,
                            operations: BTreeMap::new(),
                        }));
                    } else {
                        *kind = Some(BindingKind::Other {
                            transport: namespace.map(ToOwned::to_owned),
                        });
                    }
                }

                "operation" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::BindingOperation {
                        name: required(name, "operation", "name")?,
                        binding: OperationBinding::default(),
                    };
                }

                _ => tracing::trace!("skipping <{}> inside binding", local_name),
            },

            Some(ParseState::BindingOperation {
                ref mut binding, ..
            }) => match local_name {
                "operation" if soap_version(namespace).is_some() => {
                    let [action] = get_attributes(reader, start.attributes(), ["soapAction"])?;
                    binding.action = action;
                }

                "input" => {
                    new_state = ParseState::BindingInput {
                        body_use: None,
                        headers: Vec::new(),
                    }
                }

                _ => tracing::trace!("skipping <{}> inside binding operation", local_name),
            },

            Some(ParseState::BindingInput {
                ref mut body_use,
                ref mut headers,
            }) if soap_version(namespace).is_some() => match local_name {
                "body" => {
                    let [use_] = get_attributes(reader, start.attributes(), ["use"])?;
                    *body_use = Some(parse_use(use_.as_deref()));
                }

                "header" => {
                    let [message, part, use_] =
                        get_attributes(reader, start.attributes(), ["message", "part", "use"])?;
                    let message = self.resolve_namespace(&required(message, "header", "message")?)?;

                    headers.push(Header {
                        message,
                        part: required(part, "header", "part")?,
                        use_: parse_use(use_.as_deref()),
                    });
                }

                _ => (),
            },

            Some(ParseState::Service { .. }) => match local_name {
                "documentation" => new_state = ParseState::Documentation(None),

                "port" => {
                    let [name, binding] =
                        get_attributes(reader, start.attributes(), ["name", "binding"])?;
                    let name = required(name, "port", "name")?;
                    let binding = self.resolve_namespace(&required(binding, "port", "binding")?)?;

                    new_state = ParseState::Port {
                        name,
                        binding,
                        address: None,
                    };
                }

                _ => tracing::trace!("skipping <{}> inside service", local_name),
            },

            Some(ParseState::Port {
                ref mut address, ..
            }) if soap_version(namespace).is_some() && local_name == "address" => {
                let [location] = get_attributes(reader, start.attributes(), ["location"])?;
                *address = Some(required(location, "address", "location")?);
            }

            Some(_) => (),
        }

        stack.extend(state);
        stack.push(new_state);
        Ok(())
    }

    fn handle_end(&mut self, stack: &mut Vec<ParseState>) -> Result<(), error::Error> {
        let finished_state = stack.pop();
        let mut next_state = stack.pop();

        match finished_state {
            Some(ParseState::Definitions) => self.pop_target_namespace(),

            Some(ParseState::Message { name, parts }) => {
                let name = self.target_namespaced(name)?;
                self.definition.messages.push(Message { name, parts })
            }

            Some(ParseState::PortType { name, operations }) => {
                let name = self.target_namespaced(name)?;
                self.definition
                    .port_types
                    .push(PortType { name, operations })
            }

            Some(ParseState::Operation {
                name,
                documentation,
                first,
                input,
                output,
            }) => {
                let kind = first
                    .and_then(|first| {
                        OperationKind::from_order(first, input.is_some(), output.is_some())
                    })
                    .ok_or_else(|| error::Error::EmptyOperation(name.clone()))?;

                if let Some(ParseState::PortType {
                    ref mut operations, ..
                }) = next_state
                {
                    operations.push(Operation {
                        name,
                        documentation,
                        kind,
                        input,
                        output,
                    })
                }
            }

            Some(ParseState::Documentation(text)) => match next_state {
                Some(
                    ParseState::Operation {
                        ref mut documentation,
                        ..
                    }
                    | ParseState::Service {
                        ref mut documentation,
                        ..
                    },
                ) => *documentation = text,
                _ => (),
            },

            Some(ParseState::Binding {
                name,
                port_type,
                kind,
                operations,
            }) => {
                let name = self.target_namespaced(name)?;
                let kind = match kind {
                    Some(BindingKind::Soap(mut soap)) => {
                        soap.operations = operations;
                        BindingKind::Soap(soap)
                    }
                    Some(other) => other,
                    None => BindingKind::Other { transport: None },
                };

                self.definition.bindings.push(Binding {
                    name,
                    port_type,
                    kind,
                })
            }

            Some(ParseState::BindingOperation { name, binding }) => {
                if let Some(ParseState::Binding {
                    ref mut operations, ..
                }) = next_state
                {
                    operations.insert(name, binding);
                }
            }

            Some(ParseState::BindingInput { body_use, headers }) => {
                if let Some(ParseState::BindingOperation {
                    ref mut binding, ..
                }) = next_state
                {
                    binding.input_use = body_use.unwrap_or_default();
                    binding.input_headers = headers;
                }
            }

            Some(ParseState::Service {
                name,
                documentation,
                ports,
            }) => {
                let name = self.target_namespaced(name)?;
                self.definition.services.push(Service {
                    name,
                    documentation,
                    ports,
                })
            }

            Some(ParseState::Port {
                name,
                binding,
                address,
            }) => {
                if let Some(ParseState::Service { ref mut ports, .. }) = next_state {
                    if let Some(location) = address {
                        self.addresses.push((binding.clone(), location));
                    }

                    ports.push(Port {
                        name: self.target_namespaced(name)?,
                        binding,
                    });
                }
            }

            _ => (),
        }

        stack.extend(next_state);
        Ok(())
    }

    fn handle_text<B: BufRead>(
        &mut self,
        stack: &mut Vec<ParseState>,
        reader: &Reader<B>,
        text: &BytesText<'_>,
    ) -> Result<(), error::Error> {
        let mut state = stack.pop();

        if let Some(ParseState::Documentation(ref mut docs)) = state {
            let unescaped = text.unescaped()?;
            let text = reader.decode(unescaped.as_ref())?;
            docs.get_or_insert_with(String::new).push_str(text);
        }

        stack.extend(state);
        Ok(())
    }

    // Addresses live on ports, the model keeps them on the SOAP binding. First port wins.
    fn attach_addresses(&mut self) {
        for (binding_name, location) in std::mem::take(&mut self.addresses) {
            let binding = self
                .definition
                .bindings
                .iter_mut()
                .find(|binding| binding.name == binding_name);

            if let Some(Binding {
                kind: BindingKind::Soap(soap),
                ..
            }) = binding
            {
                if soap.address.is_some() {
                    continue;
                }

                match Url::parse(&location) {
                    Ok(url) => soap.address = Some(url),
                    Err(err) => tracing::debug!(%location, %err, "ignoring invalid port address"),
                }
            }
        }
    }
}

pub fn parse(url: Url) -> Result<(Definition, Namespaces), error::Error> {
    Parser::new(Some(url)).parse()
}

pub fn parse_str(document: &str) -> Result<(Definition, Namespaces), error::Error> {
    let mut parser = Parser::new(None);
    parser.parse_xml(Reader::from_str(document))?;
    parser.attach_addresses();

    Ok((parser.definition, parser.namespaces))
}
