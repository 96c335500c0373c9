//! Operation descriptors with a type-state builder.
//!
//! An [`OperationDescriptor`] bundles everything the engine needs to know
//! about one endpoint: its routing (method and path), which input fields are
//! path parameters, the success payload shape, and the ordered set of
//! declared errors keyed by their upstream error code.
//!
//! Descriptors are plain values. They are built once, usually inside the
//! thunk handed to [`make`](crate::make), and never change afterwards.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ConfigError, ValidationError};
use crate::method::RestMethod;
use crate::operation_id::OperationId;
use crate::response::ResponseFormat;

/// Marker traits for builder state tracking.
pub mod builder_state {
    /// Marker for a field that has not been set.
    pub struct Missing;
    /// Marker for a field that has been set.
    pub struct Present;
}

use builder_state::{Missing, Present};

/// Rendered path parameter values keyed by parameter name.
pub type PathParams = BTreeMap<String, String>;

/// Builds a URL path from path parameters.
///
/// Values arrive percent-encoded, so each one is a single segment however
/// it is spliced in. The returned path is split on `/` and used verbatim.
pub type PathFn = fn(&PathParams) -> String;

/// Caller-supplied input check run before anything is sent.
pub type InputCheck<I> = fn(&I) -> Result<(), String>;

type ErrorDecoder<E> = Box<dyn Fn(Value) -> Result<E, serde_json::Error> + Send + Sync>;

/// How an operation's URL path is produced.
#[derive(Debug, Clone)]
pub enum PathSpec {
    /// A literal template with `{name}` placeholders, e.g.
    /// `/organizations/{organization}/databases/{database}`.
    Template(String),
    /// A function of the declared path parameters.
    Function {
        /// Names of the input fields consumed by the function.
        params: Vec<String>,
        /// The path-building function.
        build: PathFn,
    },
}

impl PathSpec {
    /// Returns the path parameter names in the order they are declared.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidPathTemplate`] if a template has
    /// unbalanced braces or an empty placeholder.
    pub fn params(&self) -> Result<Vec<String>, ConfigError> {
        match self {
            Self::Template(template) => parse_placeholders(template),
            Self::Function { params, .. } => {
                if params.iter().any(String::is_empty) {
                    return Err(ConfigError::invalid_path("empty path parameter name"));
                }
                Ok(params.clone())
            }
        }
    }

    /// Renders the path into its segments.
    ///
    /// `params` holds every declared parameter, already percent-encoded; the
    /// request builder guarantees this before rendering. A parameter that
    /// renders empty still yields its own (empty) segment.
    pub(crate) fn segments(&self, params: &PathParams) -> Vec<String> {
        match self {
            Self::Template(template) => template
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| substitute(segment, params))
                .collect(),
            Self::Function { build, .. } => {
                let path = build(params);
                let path = path.strip_prefix('/').unwrap_or(&path);
                if path.is_empty() {
                    return Vec::new();
                }
                path.split('/').map(str::to_string).collect()
            }
        }
    }
}

/// Extracts `{name}` placeholders from a template.
fn parse_placeholders(template: &str) -> Result<Vec<String>, ConfigError> {
    let mut params = Vec::new();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut param = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(ConfigError::invalid_path(format!(
                                "unclosed brace in {template}"
                            )))
                        }
                        Some(next) => param.push(next),
                    }
                }
                if param.is_empty() {
                    return Err(ConfigError::invalid_path(format!(
                        "empty placeholder in {template}"
                    )));
                }
                params.push(param);
            }
            '}' => {
                return Err(ConfigError::invalid_path(format!(
                    "unmatched closing brace in {template}"
                )))
            }
            _ => {}
        }
    }

    Ok(params)
}

/// Replaces every placeholder in one template segment.
fn substitute(segment: &str, params: &PathParams) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        out.push_str(params.get(name).map_or("", String::as_str));
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// One declared error: a stable upstream code plus a decoder into the
/// operation's error enum.
pub struct ErrorShape<E> {
    code: String,
    decode: ErrorDecoder<E>,
}

impl<E: 'static> ErrorShape<E> {
    /// Declares an error code whose payload decodes into `T` and is wrapped
    /// into the operation's error enum by `wrap` (typically a tuple variant).
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let shape = ErrorShape::new("not_found", DeleteBackupError::NotFound);
    /// ```
    pub fn new<T, W>(code: impl Into<String>, wrap: W) -> Self
    where
        T: DeserializeOwned + 'static,
        W: Fn(T) -> E + Send + Sync + 'static,
    {
        Self {
            code: code.into(),
            decode: Box::new(move |payload| serde_json::from_value(payload).map(&wrap)),
        }
    }
}

impl<E> ErrorShape<E> {
    /// Returns the upstream error code this shape answers to.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Decodes a merged error payload into the declared variant.
    pub fn decode(&self, payload: Value) -> Result<E, serde_json::Error> {
        (self.decode)(payload)
    }
}

impl<E> fmt::Debug for ErrorShape<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorShape")
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

/// A declarative description of one remote operation.
///
/// ## Type Parameters
///
/// - `I`: The input record. Serialized to find path, query and body fields.
/// - `F`: The [`ResponseFormat`] describing the success payload.
/// - `E`: The closed error enum, one variant per declared error code.
///
/// ## Examples
///
/// ```rust,ignore
/// use opkit::{OperationDescriptor, RestMethod};
/// use opkit::response::VoidFormat;
///
/// let descriptor: OperationDescriptor<DeleteBackupInput, VoidFormat, DeleteBackupError> =
///     OperationDescriptor::builder()
///         .id("delete_backup")
///         .method(RestMethod::Delete)
///         .path("/organizations/{organization}/databases/{database}/branches/{branch}/backups/{id}")
///         .error("not_found", DeleteBackupError::NotFound)
///         .error("forbidden", DeleteBackupError::Forbidden)
///         .build()?;
/// ```
pub struct OperationDescriptor<I, F: ResponseFormat, E> {
    id: OperationId,
    method: RestMethod,
    path: PathSpec,
    path_params: Vec<String>,
    errors: Vec<ErrorShape<E>>,
    description: Option<String>,
    input_check: Option<InputCheck<I>>,
    _format: PhantomData<fn() -> F>,
}

impl<I, F: ResponseFormat, E> fmt::Debug for OperationDescriptor<I, F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl<I, F: ResponseFormat, E> OperationDescriptor<I, F, E> {
    /// Creates a new descriptor builder.
    pub fn builder() -> OperationDescriptorBuilder<Missing, Missing, Missing, I, F, E> {
        OperationDescriptorBuilder::new()
    }

    /// Returns the operation's identifier.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the validated identifier carried by this operation's defects.
    pub fn operation_id(&self) -> &OperationId {
        &self.id
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Returns the path specification.
    pub fn path(&self) -> &PathSpec {
        &self.path
    }

    /// Returns the names of the input fields consumed into the URL path.
    pub fn path_params(&self) -> &[String] {
        &self.path_params
    }

    /// Returns `true` if `field` is consumed into the URL path.
    pub fn is_path_param(&self, field: &str) -> bool {
        self.path_params.iter().any(|p| p == field)
    }

    /// Returns the declared errors in declaration order.
    pub fn errors(&self) -> &[ErrorShape<E>] {
        &self.errors
    }

    /// Returns the declared error codes in declaration order.
    pub fn error_codes(&self) -> Vec<&str> {
        self.errors.iter().map(ErrorShape::code).collect()
    }

    /// Looks up the declared error for an upstream code.
    pub fn find_error(&self, code: &str) -> Option<&ErrorShape<E>> {
        self.errors.iter().find(|shape| shape.code == code)
    }

    /// Returns the optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Validates caller input and returns its fields as a JSON record.
    ///
    /// Unit input (`()`) yields an empty record.
    ///
    /// ## Errors
    ///
    /// Returns a [`ValidationError`] if the input check rejects the value,
    /// if serialization fails, or if the input is not a record.
    pub fn validate(&self, input: &I) -> Result<Map<String, Value>, ValidationError>
    where
        I: Serialize,
    {
        if let Some(check) = self.input_check {
            check(input).map_err(|reason| ValidationError::InputRejected {
                operation: self.id.clone(),
                reason,
            })?;
        }

        match serde_json::to_value(input).map_err(ValidationError::InputSerialization)? {
            Value::Object(fields) => Ok(fields),
            Value::Null => Ok(Map::new()),
            other => Err(ValidationError::InputNotRecord {
                found: json_kind(&other),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Type-state builder for [`OperationDescriptor`].
///
/// The phantom state parameters track whether the id, method and path have
/// been set; `build` only exists once all three are present.
pub struct OperationDescriptorBuilder<Id, Method, Path, I, F: ResponseFormat, E> {
    id: Option<String>,
    method: Option<RestMethod>,
    path: Option<PathSpec>,
    errors: Vec<ErrorShape<E>>,
    description: Option<String>,
    input_check: Option<InputCheck<I>>,
    _phantom: PhantomData<(fn() -> (Id, Method, Path), fn() -> F)>,
}

impl<I, F: ResponseFormat, E> OperationDescriptorBuilder<Missing, Missing, Missing, I, F, E> {
    /// Creates a new builder with no fields set.
    pub fn new() -> Self {
        Self {
            id: None,
            method: None,
            path: None,
            errors: Vec::new(),
            description: None,
            input_check: None,
            _phantom: PhantomData,
        }
    }
}

impl<I, F: ResponseFormat, E> Default
    for OperationDescriptorBuilder<Missing, Missing, Missing, I, F, E>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, M, P, I, F: ResponseFormat, E> OperationDescriptorBuilder<Id, M, P, I, F, E> {
    fn transition<Id2, M2, P2>(self) -> OperationDescriptorBuilder<Id2, M2, P2, I, F, E> {
        OperationDescriptorBuilder {
            id: self.id,
            method: self.method,
            path: self.path,
            errors: self.errors,
            description: self.description,
            input_check: self.input_check,
            _phantom: PhantomData,
        }
    }

    /// Sets an optional description for this operation.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Registers a check run against the input before the request is built.
    pub fn validate_input(mut self, check: InputCheck<I>) -> Self {
        self.input_check = Some(check);
        self
    }
}

impl<Id, M, P, I, F: ResponseFormat, E: 'static> OperationDescriptorBuilder<Id, M, P, I, F, E> {
    /// Declares an error code and the variant it decodes into.
    ///
    /// Errors are matched in declaration order; codes must be unique.
    pub fn error<T, W>(mut self, code: impl Into<String>, wrap: W) -> Self
    where
        T: DeserializeOwned + 'static,
        W: Fn(T) -> E + Send + Sync + 'static,
    {
        self.errors.push(ErrorShape::new(code, wrap));
        self
    }
}

// ID setter - transitions Id from Missing to Present
impl<M, P, I, F: ResponseFormat, E> OperationDescriptorBuilder<Missing, M, P, I, F, E> {
    /// Sets the operation ID.
    pub fn id(mut self, id: impl Into<String>) -> OperationDescriptorBuilder<Present, M, P, I, F, E> {
        self.id = Some(id.into());
        self.transition()
    }
}

// Method setter - transitions Method from Missing to Present
impl<Id, P, I, F: ResponseFormat, E> OperationDescriptorBuilder<Id, Missing, P, I, F, E> {
    /// Sets the HTTP method.
    pub fn method(mut self, method: RestMethod) -> OperationDescriptorBuilder<Id, Present, P, I, F, E> {
        self.method = Some(method);
        self.transition()
    }
}

// Path setters - transition Path from Missing to Present
impl<Id, M, I, F: ResponseFormat, E> OperationDescriptorBuilder<Id, M, Missing, I, F, E> {
    /// Sets a URL path template with `{param}` placeholders.
    pub fn path(mut self, template: impl Into<String>) -> OperationDescriptorBuilder<Id, M, Present, I, F, E> {
        self.path = Some(PathSpec::Template(template.into()));
        self.transition()
    }

    /// Sets a path-building function over the named path parameters.
    pub fn path_fn(
        mut self,
        params: &[&str],
        build: PathFn,
    ) -> OperationDescriptorBuilder<Id, M, Present, I, F, E> {
        self.path = Some(PathSpec::Function {
            params: params.iter().map(|p| p.to_string()).collect(),
            build,
        });
        self.transition()
    }
}

impl<I, F: ResponseFormat, E> OperationDescriptorBuilder<Present, Present, Present, I, F, E> {
    /// Builds the descriptor.
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] if the id is invalid, the path template is
    /// malformed, or two declared errors share a code.
    pub fn build(self) -> Result<OperationDescriptor<I, F, E>, ConfigError> {
        let id = OperationId::new(self.id.ok_or(ConfigError::missing_field("id"))?)?;
        let method = self.method.ok_or(ConfigError::missing_field("method"))?;
        let path = self.path.ok_or(ConfigError::missing_field("path"))?;
        let path_params = path.params()?;

        let mut seen = HashSet::new();
        for shape in &self.errors {
            if !seen.insert(shape.code()) {
                return Err(ConfigError::DuplicateErrorCode {
                    operation: id.clone(),
                    code: shape.code().to_string(),
                });
            }
        }

        Ok(OperationDescriptor {
            id,
            method,
            path,
            path_params,
            errors: self.errors,
            description: self.description,
            input_check: self.input_check,
            _format: PhantomData,
        })
    }
}
