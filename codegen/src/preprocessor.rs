use super::{error::Error, types};
use soapstub_wsdl::types as wsdl;

/// Resolves the ports of `service`, leaving out every port whose binding is not SOAP.
pub fn resolve_ports<'a>(
    definition: &'a wsdl::Definition,
    service: &'a wsdl::Service,
) -> Result<Vec<types::Port<'a>>, Error> {
    let mut ports = Vec::new();

    for port in &service.ports {
        let binding = definition
            .find_binding(&port.binding)
            .ok_or_else(|| Error::UnknownBinding {
                port: port.name.name.clone(),
                binding: port.binding.name.clone(),
            })?;

        let soap = if let Some(soap) = binding.soap() {
            soap
        } else {
            tracing::debug!(port = %port.name.name, "skipping port with non-SOAP binding");
            continue;
        };

        let port_type = definition
            .find_port_type(&binding.port_type)
            .ok_or_else(|| Error::UnknownPortType {
                binding: binding.name.name.clone(),
                port_type: binding.port_type.name.clone(),
            })?;

        ports.push(types::Port {
            port,
            binding,
            soap,
            port_type,
        });
    }

    Ok(ports)
}
