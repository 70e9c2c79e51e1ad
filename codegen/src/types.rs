use crate::{naming::NameMapper, typemap::TypeMapper};
use soapstub_wsdl::types::{self as wsdl, Definition};

/// Read-only inputs shared by every step of the pass.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub definition: &'a Definition,
    pub types: &'a dyn TypeMapper,
    pub names: &'a dyn NameMapper,
}

/// A service port whose binding is SOAP, with its references resolved.
#[derive(Debug, Clone, Copy)]
pub struct Port<'a> {
    pub port: &'a wsdl::Port,
    pub binding: &'a wsdl::Binding,
    pub soap: &'a wsdl::SoapBinding,
    pub port_type: &'a wsdl::PortType,
}
