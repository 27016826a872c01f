//! Functionality related to describing definitions of named dependencies.
//! [Container](crate::container::Container)s store a [Definition] per
//! registered name and use it to produce instances on resolution, either by
//! returning stored values or by invoking factories with resolved
//! dependency lists.

use crate::error::{ErrorPtr, ResolutionError};
use crate::instance::{downcast, instance, FactoryPtr, InstancePtr};
use derivative::Derivative;
use std::sync::Arc;

/// Output format for category queries.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CategoryFormat {
    /// Ordered sequence of resolved instances, in registration order.
    #[default]
    Array,
    /// Name-to-instance map with one entry per registered name.
    Literal,
}

/// A resolution request carrying either a single name or a whole category.
/// Bare strings convert into name queries, which makes the common case
/// (`container.resolve("name")`) work without building a query by hand.
#[derive(Clone, Debug, Default)]
pub struct Query {
    /// Name of a single definition to resolve. Takes precedence over
    /// [category](Query::category) when both are present.
    pub name: Option<String>,

    /// Category tag to resolve in bulk.
    pub category: Option<String>,

    /// Aggregation format for category queries.
    pub format: CategoryFormat,

    /// Per-call singleton override. A `true` override promotes the resolved
    /// definition to singleton for this call; a `false` override never
    /// demotes one.
    pub singleton: Option<bool>,
}

impl Query {
    /// Creates a query for a single named definition.
    pub fn name<T: Into<String>>(name: T) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Creates a query for all definitions registered under a category.
    pub fn category<T: Into<String>>(category: T) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }

    /// Sets the aggregation format for a category query.
    pub fn with_format(mut self, format: CategoryFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the per-call singleton override.
    pub fn with_singleton(mut self, singleton: bool) -> Self {
        self.singleton = Some(singleton);
        self
    }
}

impl From<&str> for Query {
    fn from(name: &str) -> Self {
        Query::name(name)
    }
}

impl From<String> for Query {
    fn from(name: String) -> Self {
        Query::name(name)
    }
}

/// Indirection registered under its own name, with its value derived from
/// another resolved instance or injected directly as an opaque literal.
#[derive(Derivative)]
#[derivative(Debug)]
pub enum Wrap {
    /// Accessor into a resolved context instance.
    Member {
        /// Name of the registered definition providing the context.
        context: String,

        #[derivative(Debug = "ignore")]
        accessor: FactoryPtr,
    },

    /// Opaque literal returned as-is, ignoring dependencies entirely.
    Value(#[derivative(Debug = "ignore")] InstancePtr),
}

/// What a registration supplies for its name. The variant decides the
/// stored [Definition] kind.
#[derive(Derivative)]
#[derivative(Debug)]
pub enum Source {
    /// No value at all; resolves to the shared
    /// [Empty](crate::instance::Empty) marker.
    Empty,

    /// A literal value stored and returned verbatim.
    Value(#[derivative(Debug = "ignore")] InstancePtr),

    /// An ordered list of literal values stored and returned verbatim as
    /// one shared sequence.
    Sequence(#[derivative(Debug = "ignore")] Vec<InstancePtr>),

    /// A constructor invoked with the resolved dependency list.
    Constructor(#[derivative(Debug = "ignore")] FactoryPtr),

    /// An indirection desugared into a constructor registration inside
    /// [register](crate::container::Container::register).
    Wrap(Wrap),
}

/// Registration spec for a single named dependency. Built via the typed
/// constructors, which erase concrete types up front so the container only
/// ever deals with [InstancePtr]s.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Registration {
    pub(crate) name: String,
    pub(crate) source: Source,
    pub(crate) singleton: Option<bool>,
    pub(crate) categories: Vec<String>,
    pub(crate) dependencies: Vec<Query>,
    pub(crate) attributes: Vec<String>,
}

impl Registration {
    fn with_source<T: Into<String>>(name: T, source: Source) -> Self {
        Self {
            name: name.into(),
            source,
            singleton: None,
            categories: Vec::new(),
            dependencies: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Registers a constructor for `T`. Resolved instances carry the
    /// identity of `T`, so downcasting results to `T` succeeds the same way
    /// calling the constructor directly would.
    pub fn constructor<N, T, F>(name: N, constructor: F) -> Self
    where
        N: Into<String>,
        T: Send + Sync + 'static,
        F: Fn(&[InstancePtr]) -> Result<T, ErrorPtr> + Send + Sync + 'static,
    {
        let factory: FactoryPtr = Arc::new(move |dependencies| {
            constructor(dependencies)
                .map(|value| Arc::new(value) as InstancePtr)
                .map_err(ResolutionError::ConstructionFailure)
        });

        Self::with_source(name, Source::Constructor(factory))
    }

    /// Registers a literal value returned verbatim on every resolution.
    pub fn value<N: Into<String>, T: Send + Sync + 'static>(name: N, value: T) -> Self {
        Self::with_source(name, Source::Value(instance(value)))
    }

    /// Registers an ordered list of values returned verbatim as one shared
    /// sequence. Use [instance](crate::instance::instance) to erase the
    /// elements.
    pub fn sequence<N, I>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = InstancePtr>,
    {
        Self::with_source(name, Source::Sequence(values.into_iter().collect()))
    }

    /// Registers a name with no value. Resolving it returns the shared
    /// [Empty](crate::instance::Empty) marker, not an error.
    pub fn empty<N: Into<String>>(name: N) -> Self {
        Self::with_source(name, Source::Empty)
    }

    /// Registers an indirection whose value is obtained by resolving
    /// `context` and applying `accessor` to it.
    pub fn wrap_member<N, X, C, T, F>(name: N, context: X, accessor: F) -> Self
    where
        N: Into<String>,
        X: Into<String>,
        C: Send + Sync + 'static,
        T: Send + Sync + 'static,
        F: Fn(&C) -> T + Send + Sync + 'static,
    {
        let accessor: FactoryPtr = Arc::new(move |dependencies| {
            let context = dependencies
                .first()
                .cloned()
                .ok_or(ResolutionError::IncompatibleInstance(std::any::type_name::<C>()))?;

            downcast::<C>(context).map(|context| instance(accessor(&context)))
        });

        Self::with_source(
            name,
            Source::Wrap(Wrap::Member {
                context: context.into(),
                accessor,
            }),
        )
    }

    /// Registers an opaque literal under a name, ignoring dependencies
    /// entirely.
    pub fn wrap_value<N: Into<String>, T: Send + Sync + 'static>(name: N, value: T) -> Self {
        Self::with_source(name, Source::Wrap(Wrap::Value(instance(value))))
    }

    /// Overrides the container-wide default lifecycle policy for this
    /// definition.
    pub fn singleton(mut self, singleton: bool) -> Self {
        self.singleton = Some(singleton);
        self
    }

    /// Appends the name to the given category on registration. Can be
    /// called multiple times for membership in multiple categories.
    pub fn in_category<T: Into<String>>(mut self, category: T) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Appends dependencies resolved, in declared order, before the
    /// constructor is invoked. Entries can be plain names or full queries,
    /// including category queries.
    pub fn with_dependencies<I, Q>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Query>,
    {
        self.dependencies
            .extend(dependencies.into_iter().map(Into::into));
        self
    }

    /// Declares an attribute tag selecting registered aspects to decorate
    /// the stored factory.
    pub fn with_attribute<T: Into<String>>(mut self, attribute: T) -> Self {
        self.attributes.push(attribute.into());
        self
    }
}

/// Stored provider for a definition, distinguishing kinds which require
/// construction from kinds returning stored values.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum Provider {
    /// Shared marker for definitions registered without a value.
    Empty(#[derivative(Debug = "ignore")] InstancePtr),

    /// Stored literal value.
    Value(#[derivative(Debug = "ignore")] InstancePtr),

    /// Stored literal sequence, pre-erased as one shared instance.
    Sequence(#[derivative(Debug = "ignore")] InstancePtr),

    /// Fully decorated factory invoked with resolved dependencies.
    Constructor(#[derivative(Debug = "ignore")] FactoryPtr),
}

impl Provider {
    /// True only for kinds invoking a factory with dependencies, as opposed
    /// to returning the stored value as-is.
    pub fn requires_construction(&self) -> bool {
        matches!(self, Provider::Constructor(_))
    }
}

/// Definition for a dependency registered in a
/// [Container](crate::container::Container).
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Definition {
    /// Unique name the definition is registered under.
    pub name: String,

    /// Stored value or factory.
    pub provider: Provider,

    /// Effective lifecycle policy, folded from the per-definition flag and
    /// the container-wide default at registration time.
    pub singleton: bool,

    /// Dependencies resolved, in declared order, before construction.
    pub dependencies: Vec<Query>,
}
