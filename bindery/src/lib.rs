//! Minimal inversion-of-control container based on named definitions and
//! runtime resolution.
//!
//! Callers register named dependencies - constructors, literal values,
//! sequences, or wrapped accessors into other instances - together with
//! their declared sub-dependencies, and later resolve a name (or a whole
//! category of names) into a constructed or cached instance graph:
//!
//! ```
//! use bindery::container::Container;
//! use bindery::definition::Registration;
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! let mut container = Container::new();
//! container
//!     .register(Registration::value("greeting", "Hello world!"))
//!     .unwrap()
//!     .register(
//!         Registration::constructor("greeter", |dependencies| {
//!             Ok(Greeter {
//!                 greeting: dependencies[0].downcast_ref::<&str>().unwrap().to_string(),
//!             })
//!         })
//!         .with_dependencies(["greeting"]),
//!     )
//!     .unwrap();
//!
//! let greeter = container.resolve_typed::<Greeter, _>("greeter").unwrap();
//! assert_eq!(greeter.greeting, "Hello world!");
//! ```
//!
//! Definitions are transient by default - resolved to a fresh instance on
//! every call - and can be flagged as singletons per definition or
//! container-wide, in which case the first constructed instance is cached
//! for the container's lifetime.

pub mod container;
pub mod definition;
pub mod error;
pub mod instance;

pub use container::{Container, ContainerConfig};
pub use definition::{CategoryFormat, Query, Registration};
pub use error::{DefinitionError, ResolutionError};
