mod common;

use common::{client, function_names, operation, stock, Fixture};
use soapstub_codegen::{
    error::Error,
    ir::{
        BaseType, FunctionKind, GeneratedClass, MemberVariable, Statement, ENDPOINT_MEMBER,
        LAST_REPLY_MEMBER, TRANSPORT_MEMBER,
    },
    Options,
};
use soapstub_wsdl::types::{OperationKind, SoapVersion, Style};

fn value_class(name: &str, dependencies: &[&str]) -> GeneratedClass {
    let mut class = GeneratedClass::new(name, BaseType::Value);
    for dependency in dependencies {
        class.add_dependency(*dependency);
    }
    class
}

fn class_names(classes: &[GeneratedClass]) -> Vec<&str> {
    classes.iter().map(|class| class.name.as_str()).collect()
}

#[test]
fn test_class_scaffolding() {
    let generated = stock(Style::Rpc).generate();
    let class = client(&generated);

    assert_eq!(class.name, "StockService");
    assert_eq!(class.base, BaseType::ServiceClient);
    assert_eq!(
        class.members,
        vec![
            MemberVariable::new(TRANSPORT_MEMBER, "Option<SoapClientInterface>").with_initializer("None"),
            MemberVariable::new(LAST_REPLY_MEMBER, "SoapMessage"),
            MemberVariable::new(ENDPOINT_MEMBER, "String"),
        ]
    );

    assert_eq!(class.functions_of_kind(FunctionKind::Constructor).count(), 1);
    assert_eq!(
        class.function("drop").unwrap().body,
        vec![Statement::ReleaseTransport]
    );

    let last_error = class.function("lastError").unwrap();
    assert!(last_error.is_const);
    assert_eq!(last_error.return_type.as_deref(), Some("String"));
    assert_eq!(last_error.body, vec![Statement::ReturnLastError]);

    let set_endpoint = class.function("setEndPoint").unwrap();
    assert_eq!(
        set_endpoint.body,
        vec![Statement::SetEndpoint {
            argument: "endpoint".into()
        }]
    );
}

#[test]
fn test_transport_factory_uses_first_soap_port() {
    let generated = stock(Style::Rpc).generate();
    let factory = client(&generated).function("transport").unwrap();

    assert_eq!(factory.kind, FunctionKind::Private);
    assert_eq!(
        factory.body,
        vec![Statement::EnsureTransport {
            default_endpoint: Some("http://stock.example.com/soap".into()),
            namespace: "urn:stock".into(),
            version: SoapVersion::Soap11,
        }]
    );
}

#[test]
fn test_scaffolding_is_emitted_once() {
    let mut fixture = stock(Style::Rpc);

    let string = fixture.xsd("string");
    let input = fixture.message("AuditIn", vec![("entry", string)]);
    let audit = fixture.port_type(
        "Audit",
        vec![operation("Log", OperationKind::OneWay, Some(&input), None)],
    );
    let stock_binding = fixture.definition.bindings[0].name.clone();
    let audit_binding = fixture.soap_binding("AuditSoap", &audit, Style::Document, vec![]);
    fixture.soap_mut(&audit_binding).version = SoapVersion::Soap12;

    fixture.definition.services[0].ports.clear();
    fixture.service(
        "Combined",
        vec![("StockPort", &stock_binding), ("AuditPort", &audit_binding)],
    );

    let generated = fixture
        .generate_with(
            &Options {
                service: Some("Combined".into()),
            },
            Vec::new(),
        )
        .unwrap();
    let class = client(&generated);
    let names = function_names(class);

    assert_eq!(names.iter().filter(|name| **name == "transport").count(), 1);
    assert_eq!(names.iter().filter(|name| **name == "lastError").count(), 1);
    assert!(names.contains(&"asyncGetQuote"));
    assert!(names.contains(&"asyncLog"));

    match &class.function("transport").unwrap().body[0] {
        Statement::EnsureTransport { version, .. } => assert_eq!(*version, SoapVersion::Soap11),
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_default_endpoint_skips_ports_without_address() {
    let mut fixture = stock(Style::Rpc);

    let string = fixture.xsd("string");
    let input = fixture.message("AuditIn", vec![("entry", string)]);
    let audit = fixture.port_type(
        "Audit",
        vec![operation("Log", OperationKind::OneWay, Some(&input), None)],
    );
    let stock_binding = fixture.definition.bindings[0].name.clone();
    let audit_binding = fixture.soap_binding("AuditSoap", &audit, Style::Rpc, vec![]);
    fixture.soap_mut(&stock_binding).address = None;
    fixture.set_address(&audit_binding, "http://audit.example.com/soap");
    fixture.soap_mut(&audit_binding).version = SoapVersion::Soap12;

    fixture.definition.services.clear();
    fixture.service(
        "Combined",
        vec![("StockPort", &stock_binding), ("AuditPort", &audit_binding)],
    );

    let generated = fixture.generate();

    assert_eq!(
        client(&generated).function("transport").unwrap().body,
        vec![Statement::EnsureTransport {
            default_endpoint: Some("http://audit.example.com/soap".into()),
            namespace: "urn:stock".into(),
            version: SoapVersion::Soap11,
        }]
    );
}

#[test]
fn test_non_soap_ports_are_skipped() {
    let mut fixture = stock(Style::Rpc);
    let port_type = fixture.definition.port_types[0].name.clone();
    let http = fixture.http_binding("StockHttpGet", &port_type);

    fixture.definition.services.clear();
    fixture.service("StockHttp", vec![("StockHttpPort", &http)]);

    let generated = fixture.generate();
    let class = client(&generated);

    assert_eq!(
        function_names(class),
        vec!["new", "drop", "setEndPoint", "lastError", "transport"]
    );
    assert!(generated.diagnostics.is_empty());

    match &class.function("transport").unwrap().body[0] {
        Statement::EnsureTransport {
            default_endpoint, ..
        } => assert_eq!(*default_endpoint, None),
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_duplicate_port_type_is_generated_once() {
    let mut fixture = stock(Style::Rpc);
    let port_type = fixture.definition.port_types[0].name.clone();
    let soap = fixture.definition.bindings[0].name.clone();
    let soap12 = fixture.soap_binding("StockSoap12", &port_type, Style::Document, vec![]);
    fixture.soap_mut(&soap12).version = SoapVersion::Soap12;

    fixture.definition.services.clear();
    fixture.service(
        "StockService",
        vec![("StockPort", &soap), ("StockPort12", &soap12)],
    );

    let generated = fixture.generate();
    let names = function_names(client(&generated));

    assert_eq!(names.iter().filter(|name| **name == "getQuote").count(), 1);
    assert_eq!(generated.diagnostics.len(), 1);
    assert_eq!(generated.diagnostics[0].subject, "StockPort12");
}

#[test]
fn test_service_selection() {
    let mut fixture = stock(Style::Rpc);
    let binding = fixture.definition.bindings[0].name.clone();
    fixture.service("BackupService", vec![("BackupPort", &binding)]);

    let generated = fixture
        .generate_with(
            &Options {
                service: Some("BackupService".into()),
            },
            Vec::new(),
        )
        .unwrap();
    assert_eq!(client(&generated).name, "BackupService");

    let result = fixture.generate_with(
        &Options {
            service: Some("Nowhere".into()),
        },
        Vec::new(),
    );
    assert!(matches!(result, Err(Error::UnknownService(name)) if name == "Nowhere"));
}

#[test]
fn test_missing_service_is_fatal() {
    let fixture = Fixture::new();

    assert!(matches!(
        fixture.generate_with(&Options::default(), Vec::new()),
        Err(Error::NoService)
    ));
}

#[test]
fn test_unnamed_service_is_fatal() {
    let mut fixture = stock(Style::Rpc);
    fixture.definition.services[0].name.name.clear();

    assert!(matches!(
        fixture.generate_with(&Options::default(), Vec::new()),
        Err(Error::UnnamedService)
    ));
}

#[test]
fn test_unknown_binding_is_fatal() {
    let mut fixture = stock(Style::Rpc);
    let missing = fixture.tns("Missing");
    fixture.service("Broken", vec![("BrokenPort", &missing)]);

    let result = fixture.generate_with(
        &Options {
            service: Some("Broken".into()),
        },
        Vec::new(),
    );

    match result {
        Err(Error::UnknownBinding { port, binding }) => {
            assert_eq!(port, "BrokenPort");
            assert_eq!(binding, "Missing");
        }
        other => panic!("expected unknown binding, got {:?}", other.map(|generated| generated.classes.len())),
    }
}

#[test]
fn test_generation_is_deterministic() {
    let fixture = stock(Style::Document);
    let values = || vec![value_class("Quote", &[]), value_class("Extra", &[])];

    let first = fixture.generate_with(&Options::default(), values()).unwrap();
    let second = fixture.generate_with(&Options::default(), values()).unwrap();

    assert_eq!(first.classes, second.classes);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn test_dependencies_are_emitted_first() {
    let fixture = stock(Style::Document);

    let generated = fixture
        .generate_with(
            &Options::default(),
            vec![
                value_class("Quote", &["Price"]),
                value_class("Price", &[]),
                value_class("Unused", &[]),
            ],
        )
        .unwrap();

    assert_eq!(
        class_names(&generated.classes),
        vec!["Price", "Quote", "Unused", "StockService"]
    );

    for (position, class) in generated.classes.iter().enumerate() {
        for dependency in &class.dependencies {
            if let Some(found) = generated.classes.iter().position(|other| &other.name == dependency) {
                assert!(found < position, "{} is emitted after {}", dependency, class.name);
            }
        }
    }
}

#[test]
fn test_dependency_cycle_is_fatal() {
    let fixture = stock(Style::Document);

    let result = fixture.generate_with(
        &Options::default(),
        vec![value_class("Quote", &["StockService"])],
    );

    match result {
        Err(Error::DependencyCycle(cycle)) => {
            assert_eq!(cycle, vec!["Quote", "StockService"]);
        }
        other => panic!("expected a cycle, got {:?}", other.map(|generated| generated.classes.len())),
    }
}
