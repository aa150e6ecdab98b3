mod entity_resolution;
mod representation;
mod wiring;

pub use entity_resolution::EntitiesFetcher;
pub(crate) use entity_resolution::EntityResolution;
pub use entity_resolution::EntityResolutionError;
pub use entity_resolution::EntityTypeResolver;
pub use entity_resolution::ResolvedEntity;
pub use representation::Representation;
pub use representation::RepresentationError;
pub use wiring::FieldResolutionContext;
pub use wiring::FieldResolutionError;
pub use wiring::FieldResolver;
pub use wiring::RuntimeWiring;
pub use wiring::RuntimeWiringBuilder;
pub use wiring::TypeResolver;
