#![allow(dead_code)]

use soapstub_codegen::{
    convert_client_service,
    error::Error,
    ir::{BaseType, GeneratedClass},
    naming::RustNameMapper,
    typemap::XsdTypeMap,
    Context, Generated, Options,
};
use soapstub_wsdl::{
    types::{
        Binding, BindingKind, Definition, Header, Message, NamespacedName, Namespaces, Operation,
        OperationBinding, OperationKind, Part, PartType, Port, PortType, Service, SoapBinding,
        SoapVersion, Style, Use,
    },
    Url,
};

pub const TNS: &str = "urn:stock";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema";

/// Builds object models by hand, without going through the reader.
pub struct Fixture {
    pub namespaces: Namespaces,
    pub definition: Definition,
    voids: Vec<NamespacedName>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            namespaces: Namespaces::default(),
            definition: Definition {
                target_namespace: TNS.to_owned(),
                ..Definition::default()
            },
            voids: Vec::new(),
        }
    }

    pub fn tns(&mut self, name: &str) -> NamespacedName {
        NamespacedName::new(&mut self.namespaces, TNS, name)
    }

    pub fn xsd(&mut self, name: &str) -> PartType {
        PartType::Type(NamespacedName::new(&mut self.namespaces, XSD, name))
    }

    pub fn element(&mut self, name: &str) -> PartType {
        PartType::Element(self.tns(name))
    }

    pub fn void_element(&mut self, name: &str) -> PartType {
        let name = self.tns(name);
        self.voids.push(name.clone());
        PartType::Element(name)
    }

    pub fn message(&mut self, name: &str, parts: Vec<(&str, PartType)>) -> NamespacedName {
        let name = self.tns(name);

        self.definition.messages.push(Message {
            name: name.clone(),
            parts: parts
                .into_iter()
                .map(|(name, ty)| Part {
                    name: name.to_owned(),
                    ty,
                })
                .collect(),
        });

        name
    }

    pub fn port_type(&mut self, name: &str, operations: Vec<Operation>) -> NamespacedName {
        let name = self.tns(name);

        self.definition.port_types.push(PortType {
            name: name.clone(),
            operations,
        });

        name
    }

    pub fn soap_binding(
        &mut self,
        name: &str,
        port_type: &NamespacedName,
        style: Style,
        operations: Vec<(&str, OperationBinding)>,
    ) -> NamespacedName {
        let name = self.tns(name);

        self.definition.bindings.push(Binding {
            name: name.clone(),
            port_type: port_type.clone(),
            kind: BindingKind::Soap(SoapBinding {
                version: SoapVersion::Soap11,
                style,
                address: None,
                operations: operations
                    .into_iter()
                    .map(|(name, binding)| (name.to_owned(), binding))
                    .collect(),
            }),
        });

        name
    }

    pub fn http_binding(&mut self, name: &str, port_type: &NamespacedName) -> NamespacedName {
        let name = self.tns(name);

        self.definition.bindings.push(Binding {
            name: name.clone(),
            port_type: port_type.clone(),
            kind: BindingKind::Other {
                transport: Some("http".to_owned()),
            },
        });

        name
    }

    pub fn soap_mut(&mut self, binding: &NamespacedName) -> &mut SoapBinding {
        let binding = self
            .definition
            .bindings
            .iter_mut()
            .find(|known| known.name == *binding)
            .expect("binding not in fixture");

        match &mut binding.kind {
            BindingKind::Soap(soap) => soap,
            BindingKind::Other { .. } => panic!("binding is not SOAP"),
        }
    }

    pub fn set_address(&mut self, binding: &NamespacedName, address: &str) {
        self.soap_mut(binding).address = Some(Url::parse(address).expect("valid address"));
    }

    pub fn service(&mut self, name: &str, ports: Vec<(&str, &NamespacedName)>) {
        let service = Service {
            name: self.tns(name),
            documentation: None,
            ports: ports
                .into_iter()
                .map(|(name, binding)| Port {
                    name: self.tns(name),
                    binding: binding.clone(),
                })
                .collect(),
        };

        self.definition.services.push(service);
    }

    pub fn types(&self) -> XsdTypeMap {
        self.voids
            .iter()
            .cloned()
            .fold(XsdTypeMap::new(&self.namespaces), XsdTypeMap::with_void)
    }

    pub fn with_context<R>(&self, f: impl FnOnce(&Context<'_>) -> R) -> R {
        let types = self.types();
        let context = Context {
            definition: &self.definition,
            types: &types,
            names: &RustNameMapper,
        };

        f(&context)
    }

    pub fn generate_with(
        &self,
        options: &Options,
        value_classes: Vec<GeneratedClass>,
    ) -> Result<Generated, Error> {
        self.with_context(|context| convert_client_service(context, options, value_classes))
    }

    pub fn generate(&self) -> Generated {
        self.generate_with(&Options::default(), Vec::new())
            .expect("generation failed")
    }
}

pub fn operation(
    name: &str,
    kind: OperationKind,
    input: Option<&NamespacedName>,
    output: Option<&NamespacedName>,
) -> Operation {
    Operation {
        name: name.to_owned(),
        documentation: None,
        kind,
        input: input.cloned(),
        output: output.cloned(),
    }
}

pub fn header(message: &NamespacedName, part: &str, use_: Use) -> Header {
    Header {
        message: message.clone(),
        part: part.to_owned(),
        use_,
    }
}

pub fn with_action(action: &str) -> OperationBinding {
    OperationBinding {
        action: Some(action.to_owned()),
        ..OperationBinding::default()
    }
}

pub fn client(generated: &Generated) -> &GeneratedClass {
    generated
        .classes
        .iter()
        .find(|class| class.base == BaseType::ServiceClient)
        .expect("no client class generated")
}

pub fn function_names(class: &GeneratedClass) -> Vec<&str> {
    class
        .functions
        .iter()
        .map(|function| function.name.as_str())
        .collect()
}

/// The stock quote service with one operation of every kind on a single SOAP port.
pub fn stock(style: Style) -> Fixture {
    let mut fixture = Fixture::new();

    let symbol = fixture.xsd("string");
    let quote = fixture.element("Quote");

    let input = fixture.message("GetQuoteIn", vec![("symbol", symbol)]);
    let output = fixture.message("GetQuoteOut", vec![("quote", quote)]);

    let port_type = fixture.port_type(
        "StockPortType",
        vec![
            operation("GetQuote", OperationKind::RequestResponse, Some(&input), Some(&output)),
            operation("Subscribe", OperationKind::OneWay, Some(&input), None),
            operation("PriceChanged", OperationKind::Notification, None, Some(&output)),
            operation("Confirm", OperationKind::SolicitResponse, Some(&input), Some(&output)),
        ],
    );

    let binding = fixture.soap_binding(
        "StockSoap",
        &port_type,
        style,
        vec![("GetQuote", with_action("urn:stock#GetQuote"))],
    );

    fixture.set_address(&binding, "http://stock.example.com/soap");
    fixture.service("StockService", vec![("StockPort", &binding)]);

    fixture
}
