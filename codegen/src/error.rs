use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing WSDL")]
    WsdlError(#[from] soapstub_wsdl::error::Error),

    #[error("Definition declares no service")]
    NoService,

    #[error("Service {0} not found")]
    UnknownService(String),

    #[error("Service has no name")]
    UnnamedService,

    #[error("Port {port} references unknown binding {binding}")]
    UnknownBinding { port: String, binding: String },

    #[error("Binding {binding} references unknown port type {port_type}")]
    UnknownPortType { binding: String, port_type: String },

    #[error("{referrer} references unknown message {message}")]
    UnknownMessage { referrer: String, message: String },

    #[error("Message {message} has no part named {part}")]
    UnknownPart { message: String, part: String },

    #[error("Classes depend on each other in a cycle: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),
}
