use crate::{
    classify::{PartInfo, TypeKind},
    ir::{BaseType, Diagnostic, GeneratedClass, GeneratedFunction, MemberVariable},
};

/// The class under construction, threaded by `&mut` through the pass.
#[derive(Debug)]
pub struct ClassBuilder {
    class: GeneratedClass,
    diagnostics: Vec<Diagnostic>,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>, base: BaseType) -> Self {
        Self {
            class: GeneratedClass::new(name, base),
            diagnostics: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.class.name
    }

    pub fn class(&self) -> &GeneratedClass {
        &self.class
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn set_docs(&mut self, docs: impl Into<String>) {
        self.class.docs = docs.into();
    }

    pub fn add_member(&mut self, member: MemberVariable) {
        self.class.members.push(member);
    }

    pub fn add_function(&mut self, function: GeneratedFunction) {
        tracing::trace!(class = %self.class.name, function = %function.name, "adding function");
        self.class.functions.push(function);
    }

    pub fn add_dependency(&mut self, name: impl Into<String>) {
        self.class.add_dependency(name);
    }

    /// Complex parts name generated value classes that must be emitted first.
    pub fn depend_on_parts<'a>(&mut self, parts: impl IntoIterator<Item = &'a PartInfo>) {
        for part in parts {
            if part.kind == TypeKind::Complex {
                self.class.add_dependency(part.local_type.clone());
            }
        }
    }

    pub fn diagnose(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            subject: subject.into(),
            message: message.into(),
        };

        tracing::warn!(class = %self.class.name, "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn finish(self) -> (GeneratedClass, Vec<Diagnostic>) {
        (self.class, self.diagnostics)
    }
}
