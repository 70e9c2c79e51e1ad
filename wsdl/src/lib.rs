use std::path::Path;

mod parser;

pub mod error;
pub mod types;

pub use url::Url;

pub fn parse<S: AsRef<str>>(
    url: S,
) -> Result<(types::Definition, types::Namespaces), error::Error> {
    let url = {
        match Url::parse(url.as_ref()) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::from_file_path(
                Path::new(url.as_ref())
                    .canonicalize()
                    .map_err(|err| error::Error::PathConversionError(Some(err)))?,
            )
            .map_err(|()| error::Error::PathConversionError(None))?,
            Err(err) => return Err(err.into()),
        }
    };

    parser::parse(url)
}

/// Reads a WSDL document held in memory. There is no base URL, so `import` elements are rejected.
pub fn parse_str(
    document: &str,
) -> Result<(types::Definition, types::Namespaces), error::Error> {
    parser::parse_str(document)
}
