use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

/// Shared, type-erased error returned by user-supplied constructors.
pub type ErrorPtr = Arc<dyn StdError + Send + Sync>;

/// Errors related to registering definitions in a
/// [Container](crate::container::Container).
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum DefinitionError {
    #[error("Name is missing or empty as part of the definition.")]
    MissingName,
    #[error("The name '{0}' is already defined in the container.")]
    DuplicateName(String),
}

/// Errors related to resolving definitions and categories.
#[derive(Error, Clone, Debug)]
pub enum ResolutionError {
    #[error("Cannot resolve a query carrying neither a name nor a category.")]
    UnresolvableQuery,
    #[error("The type '{0}' is not configured in the container.")]
    UnknownType(String),
    #[error("Tried to downcast instance to incompatible type: {0}")]
    IncompatibleInstance(&'static str),
    #[error("Constructor returned an error: {0}")]
    ConstructionFailure(ErrorPtr),
}
