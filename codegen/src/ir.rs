//! Class descriptions produced by the client stub pass.
//!
//! A [`GeneratedClass`] is handed to a printer unchanged. Function bodies are
//! ordered [`Statement`]s; only the marshaling strategy decides their shape.

use soapstub_wsdl::types::{SoapVersion, Use};
use std::{collections::BTreeSet, fmt};

pub const MESSAGE_TYPE: &str = "SoapMessage";
pub const TRANSPORT_TYPE: &str = "SoapClientInterface";
pub const WATCHER_TYPE: &str = "PendingCallWatcher";

pub const TRANSPORT_MEMBER: &str = "transport";
pub const LAST_REPLY_MEMBER: &str = "last_reply";
pub const ENDPOINT_MEMBER: &str = "endpoint";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    ServiceClient,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Constructor,
    Destructor,
    Public,
    Private,
    Signal,
    /// Private completion handler, invoked once per finished call.
    Slot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberVariable {
    pub name: String,
    pub ty: String,
    pub initializer: Option<String>,
}

/// Where a decoded reply value is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    First,
    Named(String),
}

/// Placement of one part into a request message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// The argument object is serialized as the whole message body.
    SerializeBody { argument: String },
    RawArgument { part: String, argument: String },
    SerializedArgument { part: String, argument: String },
}

/// Extraction of one part from a reply message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// The whole reply payload is deserialized into one object.
    DeserializePayload { ty: String },
    Cast { source: ValueSource, ty: String },
    Deserialize { source: ValueSource, ty: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    NewMessage {
        use_: Use,
    },
    Marshal(Outgoing),
    /// Blocking call; the reply is stored as the last reply.
    Call {
        operation: String,
        action: Option<String>,
    },
    AsyncCall {
        operation: String,
        action: Option<String>,
    },
    /// Binds a fresh watcher to the pending call just issued.
    Watch {
        callback: String,
    },
    ReturnIfFault {
        default: Option<String>,
    },
    Return(Incoming),
    /// Takes the watcher's reply and emits exactly one of the two signals.
    Complete {
        success: String,
        failure: String,
        values: Vec<Incoming>,
    },
    InstallHeader {
        name: String,
    },
    SetEndpoint {
        argument: String,
    },
    ReleaseTransport,
    ReturnLastError,
    /// Creates the transport handle on first use and returns it.
    EnsureTransport {
        default_endpoint: Option<String>,
        namespace: String,
        version: SoapVersion,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    pub name: String,
    pub return_type: Option<String>,
    pub arguments: Vec<Argument>,
    pub kind: FunctionKind,
    pub is_const: bool,
    pub body: Vec<Statement>,
    pub docs: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    pub name: String,
    pub base: BaseType,
    pub members: Vec<MemberVariable>,
    pub functions: Vec<GeneratedFunction>,
    pub dependencies: BTreeSet<String>,
    pub docs: String,
}

/// A survivable problem found while generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub subject: String,
    pub message: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl MemberVariable {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            initializer: None,
        }
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }
}

impl GeneratedFunction {
    pub fn new(name: impl Into<String>, kind: FunctionKind) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            arguments: Vec::new(),
            kind,
            is_const: false,
            body: Vec::new(),
            docs: String::new(),
        }
    }

    pub fn returning(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn with_body(mut self, body: Vec<Statement>) -> Self {
        self.body = body;
        self
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = docs.into();
        self
    }

    pub fn constant(mut self) -> Self {
        self.is_const = true;
        self
    }
}

impl GeneratedClass {
    pub fn new(name: impl Into<String>, base: BaseType) -> Self {
        Self {
            name: name.into(),
            base,
            members: Vec::new(),
            functions: Vec::new(),
            dependencies: BTreeSet::new(),
            docs: String::new(),
        }
    }

    /// Records that `name` must be emitted before this class. Self references are dropped.
    pub fn add_dependency(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.name {
            self.dependencies.insert(name);
        }
    }

    pub fn function(&self, name: &str) -> Option<&GeneratedFunction> {
        self.functions.iter().find(|function| function.name == name)
    }

    pub fn functions_of_kind(
        &self,
        kind: FunctionKind,
    ) -> impl Iterator<Item = &GeneratedFunction> + '_ {
        self.functions
            .iter()
            .filter(move |function| function.kind == kind)
    }
}

impl ValueSource {
    fn render(&self, reply: &str) -> String {
        match self {
            ValueSource::First => format!("{}.arguments().first()", reply),
            ValueSource::Named(name) => format!("{}.arguments().value(\"{}\")", reply, name),
        }
    }
}

impl Incoming {
    pub fn ty(&self) -> &str {
        match self {
            Incoming::DeserializePayload { ty }
            | Incoming::Cast { ty, .. }
            | Incoming::Deserialize { ty, .. } => ty,
        }
    }

    fn render(&self, reply: &str) -> String {
        match self {
            Incoming::DeserializePayload { ty } => {
                format!("{}::deserialize({}.arguments())", ty, reply)
            }
            Incoming::Cast { source, ty } => format!("{}.value::<{}>()", source.render(reply), ty),
            Incoming::Deserialize { source, ty } => {
                format!("{}::deserialize({})", ty, source.render(reply))
            }
        }
    }
}

fn use_name(use_: Use) -> &'static str {
    match use_ {
        Use::Encoded => "Use::Encoded",
        Use::Literal => "Use::Literal",
    }
}

fn action_suffix(action: &Option<String>) -> String {
    match action {
        Some(action) => format!(", \"{}\"", action),
        None => String::new(),
    }
}

impl fmt::Display for Outgoing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outgoing::SerializeBody { argument } => {
                write!(f, "message.set_arguments({}.serialize());", argument)
            }
            Outgoing::RawArgument { part, argument } => {
                write!(f, "message.add_argument(\"{}\", {});", part, argument)
            }
            Outgoing::SerializedArgument { part, argument } => {
                write!(f, "message.add_argument(\"{}\", {}.serialize());", part, argument)
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::NewMessage { use_ } => write!(
                f,
                "let mut message = {}::new({});",
                MESSAGE_TYPE,
                use_name(*use_)
            ),
            Statement::Marshal(outgoing) => write!(f, "{}", outgoing),
            Statement::Call { operation, action } => write!(
                f,
                "self.{} = self.{}().call(\"{}\", message{});",
                LAST_REPLY_MEMBER,
                TRANSPORT_MEMBER,
                operation,
                action_suffix(action)
            ),
            Statement::AsyncCall { operation, action } => write!(
                f,
                "let pending = self.{}().async_call(\"{}\", message{});",
                TRANSPORT_MEMBER,
                operation,
                action_suffix(action)
            ),
            Statement::Watch { callback } => write!(
                f,
                "{}::new(pending).on_finished(Self::{});",
                WATCHER_TYPE, callback
            ),
            Statement::ReturnIfFault { default } => match default {
                Some(ty) => write!(
                    f,
                    "if self.{}.is_fault() {{ return {}::default(); }}",
                    LAST_REPLY_MEMBER, ty
                ),
                None => write!(f, "if self.{}.is_fault() {{ return; }}", LAST_REPLY_MEMBER),
            },
            Statement::Return(incoming) => {
                write!(f, "return {};", incoming.render(&format!("self.{}", LAST_REPLY_MEMBER)))
            }
            Statement::Complete {
                success,
                failure,
                values,
            } => {
                let values = values
                    .iter()
                    .map(|value| value.render("reply"))
                    .collect::<Vec<_>>()
                    .join(", ");

                writeln!(f, "let reply = watcher.return_message();")?;
                writeln!(f, "if reply.is_fault() {{")?;
                writeln!(f, "    emit {}(reply);", failure)?;
                writeln!(f, "}} else {{")?;
                writeln!(f, "    emit {}({});", success, values)?;
                write!(f, "}}")
            }
            Statement::InstallHeader { name } => write!(
                f,
                "self.{}().set_header(\"{}\", message);",
                TRANSPORT_MEMBER, name
            ),
            Statement::SetEndpoint { argument } => {
                write!(f, "self.{} = {};", ENDPOINT_MEMBER, argument)
            }
            Statement::ReleaseTransport => write!(f, "self.{} = None;", TRANSPORT_MEMBER),
            Statement::ReturnLastError => write!(
                f,
                "return if self.{0}.is_fault() {{ self.{0}.fault_as_string() }} else {{ String::new() }};",
                LAST_REPLY_MEMBER
            ),
            Statement::EnsureTransport {
                default_endpoint,
                namespace,
                version,
            } => {
                let fallback = match default_endpoint {
                    Some(endpoint) => format!("\"{}\"", endpoint),
                    None => "\"\"".to_owned(),
                };

                writeln!(f, "if self.{}.is_none() {{", TRANSPORT_MEMBER)?;
                writeln!(
                    f,
                    "    let endpoint = if self.{0}.is_empty() {{ {1} }} else {{ &self.{0} }};",
                    ENDPOINT_MEMBER, fallback
                )?;
                writeln!(
                    f,
                    "    self.{} = Some({}::new(endpoint, \"{}\", {:?}));",
                    TRANSPORT_MEMBER, TRANSPORT_TYPE, namespace, version
                )?;
                writeln!(f, "}}")?;
                write!(f, "return self.{}.as_ref();", TRANSPORT_MEMBER)
            }
        }
    }
}

impl fmt::Display for GeneratedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.docs.lines() {
            writeln!(f, "    /// {}", line)?;
        }

        let kind = match self.kind {
            FunctionKind::Constructor => "constructor",
            FunctionKind::Destructor => "destructor",
            FunctionKind::Public => "public",
            FunctionKind::Private => "private",
            FunctionKind::Signal => "signal",
            FunctionKind::Slot => "slot",
        };

        let arguments = self
            .arguments
            .iter()
            .map(|argument| format!("{}: {}", argument.name, argument.ty))
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "    {} fn {}({})", kind, self.name, arguments)?;

        if let Some(ty) = &self.return_type {
            write!(f, " -> {}", ty)?;
        }

        if self.is_const {
            write!(f, " const")?;
        }

        if self.body.is_empty() {
            return writeln!(f, ";");
        }

        writeln!(f, " {{")?;
        for statement in &self.body {
            for line in statement.to_string().lines() {
                writeln!(f, "        {}", line)?;
            }
        }
        writeln!(f, "    }}")
    }
}

impl fmt::Display for GeneratedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.docs.lines() {
            writeln!(f, "/// {}", line)?;
        }

        let base = match self.base {
            BaseType::ServiceClient => "ServiceClient",
            BaseType::Value => "Value",
        };
        writeln!(f, "class {} : {} {{", self.name, base)?;

        if !self.dependencies.is_empty() {
            let dependencies = self.dependencies.iter().cloned().collect::<Vec<_>>();
            writeln!(f, "    // depends on {}", dependencies.join(", "))?;
        }

        for member in &self.members {
            match &member.initializer {
                Some(initializer) => {
                    writeln!(f, "    {}: {} = {};", member.name, member.ty, initializer)?
                }
                None => writeln!(f, "    {}: {};", member.name, member.ty)?,
            }
        }

        for function in &self.functions {
            writeln!(f)?;
            write!(f, "{}", function)?;
        }

        writeln!(f, "}}")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}
