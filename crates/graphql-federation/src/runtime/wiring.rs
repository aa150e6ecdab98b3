use crate::runtime::EntityResolutionError;
use crate::runtime::RepresentationError;
use serde_json::Map;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// The arguments of one field execution, as an executor would hand them over.
#[derive(Clone, Debug, Default)]
pub struct FieldResolutionContext {
    arguments: Map<String, Value>,
}

impl FieldResolutionContext {
    pub fn new(arguments: Map<String, Value>) -> Self {
        Self { arguments }
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }
}

/// Resolves one field execution to a JSON value.
pub type FieldResolver =
    Arc<dyn Fn(&FieldResolutionContext) -> Result<Value, FieldResolutionError> + Send + Sync>;

/// Maps a resolved value to the name of its concrete type, for abstract-type
/// member selection.
pub type TypeResolver = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Errors surfaced by the federation-provided field resolvers. The external
/// executor turns these into field-level execution errors; this crate neither
/// retries nor suppresses them.
#[derive(Debug, Error)]
pub enum FieldResolutionError {
    #[error("The `{name}` argument is required but was not supplied")]
    MissingArgument { name: String },

    #[error("The `{name}` argument must be a list value")]
    InvalidArgument { name: String },

    #[error(transparent)]
    InvalidRepresentation(#[from] RepresentationError),

    #[error(transparent)]
    EntityResolution(#[from] EntityResolutionError),
}

/// Field and type resolvers keyed by schema coordinates.
///
/// Callers may register resolvers for their own (non-federation) fields; the
/// build step merges the federation entries (`Query._service`,
/// `Query._entities`, and the `_Entity` type resolver) into the same map, and
/// the external executor consumes the merged result.
#[derive(Clone, Default)]
pub struct RuntimeWiring {
    field_resolvers: HashMap<(String, String), FieldResolver>,
    type_resolvers: HashMap<String, TypeResolver>,
}

impl RuntimeWiring {
    pub fn builder() -> RuntimeWiringBuilder {
        RuntimeWiringBuilder {
            wiring: RuntimeWiring::default(),
        }
    }

    pub fn field_resolver(&self, type_name: &str, field_name: &str) -> Option<&FieldResolver> {
        self.field_resolvers
            .get(&(type_name.to_string(), field_name.to_string()))
    }

    pub fn type_resolver(&self, type_name: &str) -> Option<&TypeResolver> {
        self.type_resolvers.get(type_name)
    }

    pub(crate) fn set_field_resolver(
        &mut self,
        type_name: &str,
        field_name: &str,
        resolver: FieldResolver,
    ) {
        self.field_resolvers
            .insert((type_name.to_string(), field_name.to_string()), resolver);
    }

    pub(crate) fn set_type_resolver(&mut self, type_name: &str, resolver: TypeResolver) {
        self.type_resolvers.insert(type_name.to_string(), resolver);
    }
}

impl std::fmt::Debug for RuntimeWiring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeWiring")
            .field("field_resolvers", &self.field_resolvers.keys())
            .field("type_resolvers", &self.type_resolvers.keys())
            .finish()
    }
}

/// Collects resolver registrations before they are frozen into a
/// [`RuntimeWiring`].
#[derive(Debug, Default)]
pub struct RuntimeWiringBuilder {
    wiring: RuntimeWiring,
}

impl RuntimeWiringBuilder {
    pub fn field_resolver(
        mut self,
        type_name: &str,
        field_name: &str,
        resolver: impl Fn(&FieldResolutionContext) -> Result<Value, FieldResolutionError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.wiring
            .set_field_resolver(type_name, field_name, Arc::new(resolver));
        self
    }

    pub fn type_resolver(
        mut self,
        type_name: &str,
        resolver: impl Fn(&Value) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.wiring.set_type_resolver(type_name, Arc::new(resolver));
        self
    }

    pub fn build(self) -> RuntimeWiring {
        self.wiring
    }
}
