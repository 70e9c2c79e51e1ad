const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "try", "type", "union", "unsafe", "use", "where", "while", "yield",
];

/// Turns names taken from a WSDL document into identifiers that are safe to emit.
pub trait NameMapper {
    fn escape(&self, name: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RustNameMapper;

impl NameMapper for RustNameMapper {
    fn escape(&self, name: &str) -> String {
        if KEYWORDS.contains(&name) {
            format!("{}_", name)
        } else {
            name.to_owned()
        }
    }
}

pub fn lowerlize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn upperlize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_helpers() {
        assert_eq!(lowerlize("GetQuote"), "getQuote");
        assert_eq!(upperlize("getQuote"), "GetQuote");
        assert_eq!(lowerlize(""), "");
        assert_eq!(upperlize("x"), "X");
    }

    #[test]
    fn test_escape_keywords() {
        let names = RustNameMapper;
        assert_eq!(names.escape("type"), "type_");
        assert_eq!(names.escape("match"), "match_");
        assert_eq!(names.escape("symbol"), "symbol");
    }
}
