use soapstub_wsdl::{
    self as wsdl,
    types::{Definition, Namespaces},
};

mod codegen;
mod preprocessor;
mod types;

pub mod builder;
pub mod classify;
pub mod error;
pub mod headers;
pub mod ir;
pub mod marshal;
pub mod naming;
pub mod order;
pub mod translate;
pub mod typemap;

pub use builder::ClassBuilder;
pub use codegen::{convert_client_service, Generated, Options};
pub use types::Context;

use naming::RustNameMapper;
use typemap::XsdTypeMap;

pub fn from_url<S: AsRef<str>>(url: S, options: &Options) -> Result<Generated, error::Error> {
    let (definition, namespaces) = wsdl::parse(url)?;
    from_definition(&definition, &namespaces, options)
}

pub fn from_definition(
    definition: &Definition,
    namespaces: &Namespaces,
    options: &Options,
) -> Result<Generated, error::Error> {
    let types = XsdTypeMap::new(namespaces);
    let context = Context {
        definition,
        types: &types,
        names: &RustNameMapper,
    };

    convert_client_service(&context, options, Vec::new())
}
