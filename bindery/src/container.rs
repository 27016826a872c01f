//! Core functionality for registering and resolving named dependencies.
//!
//! The [Container] owns every registered [Definition] together with the
//! category table and the aspect table, and evaluates resolution requests
//! as a plain recursive call tree: dependencies of a definition are
//! resolved through the same algorithm as the definition itself, so a
//! dependency entry can be a name, a whole category, or a wrapped literal.
//!
//! Note: the container is single-threaded by design. Nothing suspends
//! during resolution and all state is mutated behind `&mut self`, so
//! callers requiring shared access serialize it externally.

use crate::definition::{CategoryFormat, Definition, Provider, Query, Registration, Source, Wrap};
use crate::error::{DefinitionError, ResolutionError};
use crate::instance::{downcast, instance, AspectFn, Empty, FactoryPtr, InstancePtr};
use fxhash::FxHashMap;
use itertools::Itertools;
use std::sync::Arc;
use tracing::{debug, trace};

/// Container-wide configuration applied to future registrations.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ContainerConfig {
    /// Default lifecycle policy for definitions without an explicit
    /// `singleton` flag.
    pub singleton: bool,
}

/// Inversion-of-control container holding named definitions and resolving
/// them into constructed or cached instance graphs.
#[derive(Default)]
pub struct Container {
    definitions: FxHashMap<String, Definition>,
    categories: FxHashMap<String, Vec<String>>,
    aspects: FxHashMap<String, Vec<AspectFn>>,
    singletons: FxHashMap<String, InstancePtr>,
    default_singleton: bool,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("definitions", &self.definitions.keys().collect::<Vec<_>>())
            .field("categories", &self.categories)
            .field("aspects", &self.aspects.keys().collect::<Vec<_>>())
            .field("singletons", &self.singletons.keys().collect::<Vec<_>>())
            .field("default_singleton", &self.default_singleton)
            .finish()
    }
}

impl Container {
    /// Creates a container with a transient default lifecycle policy.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a container with the given configuration.
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            default_singleton: config.singleton,
            ..Default::default()
        }
    }

    /// Registers a definition under its unique name. Returns the container
    /// itself, so registrations can chain via `?`.
    ///
    /// Wrap registrations re-enter this function desugared into ordinary
    /// constructor registrations with the context as their only dependency.
    pub fn register(&mut self, registration: Registration) -> Result<&mut Self, DefinitionError> {
        if registration.name.is_empty() {
            return Err(DefinitionError::MissingName);
        }

        if self.definitions.contains_key(&registration.name) {
            return Err(DefinitionError::DuplicateName(registration.name));
        }

        let Registration {
            name,
            source,
            singleton,
            categories,
            dependencies,
            attributes,
        } = registration;

        let provider = match source {
            Source::Wrap(wrap) => {
                return self.register(Self::desugar_wrap(name, wrap, singleton, categories));
            }
            Source::Empty => Provider::Empty(instance(Empty)),
            Source::Value(value) => Provider::Value(value),
            Source::Sequence(values) => Provider::Sequence(instance(values)),
            Source::Constructor(factory) => {
                Provider::Constructor(self.decorate(factory, &attributes))
            }
        };

        // Empty definitions never carry dependencies, so resolving them
        // performs no dependency work.
        let dependencies = match &provider {
            Provider::Empty(_) => Vec::new(),
            _ => dependencies,
        };

        debug!("Registering definition '{name}'.");

        for category in categories {
            self.categories
                .entry(category)
                .or_default()
                .push(name.clone());
        }

        let definition = Definition {
            name: name.clone(),
            provider,
            singleton: singleton.unwrap_or(self.default_singleton),
            dependencies,
        };

        self.definitions.insert(name, definition);

        Ok(self)
    }

    /// Appends a decorator applied to future constructor registrations
    /// declaring the given attribute tag. Aspects registered under one tag
    /// wrap factories in registration order.
    pub fn register_aspect<T, F>(&mut self, attribute: T, aspect: F) -> &mut Self
    where
        T: Into<String>,
        F: Fn(FactoryPtr) -> FactoryPtr + Send + Sync + 'static,
    {
        let attribute = attribute.into();

        debug!("Registering aspect for attribute '{attribute}'.");

        self.aspects
            .entry(attribute)
            .or_default()
            .push(Box::new(aspect));
        self
    }

    /// Resolves a query into a type-erased instance. Bare names resolve a
    /// single definition; category queries aggregate every member in
    /// registration order.
    pub fn resolve<Q: Into<Query>>(&mut self, query: Q) -> Result<InstancePtr, ResolutionError> {
        self.resolve_query(&query.into())
    }

    /// Typed front over [resolve](Self::resolve) downcasting the result to
    /// a concrete type.
    pub fn resolve_typed<T, Q>(&mut self, query: Q) -> Result<Arc<T>, ResolutionError>
    where
        T: Send + Sync + 'static,
        Q: Into<Query>,
    {
        self.resolve(query).and_then(downcast::<T>)
    }

    /// Returns the definition registered under the given name.
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    /// Checks if there's a definition with the given name.
    pub fn is_registered(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Checks if any definition was registered under the given category.
    pub fn is_category_registered(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    fn desugar_wrap(
        name: String,
        wrap: Wrap,
        singleton: Option<bool>,
        categories: Vec<String>,
    ) -> Registration {
        match wrap {
            Wrap::Member { context, accessor } => Registration {
                name,
                source: Source::Constructor(accessor),
                singleton,
                categories,
                dependencies: vec![Query::name(context)],
                attributes: Vec::new(),
            },
            Wrap::Value(value) => Registration {
                name,
                source: Source::Constructor(Arc::new(move |_: &[InstancePtr]| Ok(value.clone()))
                    as FactoryPtr),
                singleton,
                categories,
                dependencies: Vec::new(),
                attributes: Vec::new(),
            },
        }
    }

    fn decorate(&self, factory: FactoryPtr, attributes: &[String]) -> FactoryPtr {
        let mut factory = factory;
        for attribute in attributes {
            if let Some(aspects) = self.aspects.get(attribute) {
                for aspect in aspects {
                    factory = aspect(factory);
                }
            }
        }

        factory
    }

    fn resolve_query(&mut self, query: &Query) -> Result<InstancePtr, ResolutionError> {
        if let Some(name) = query.name.as_deref().filter(|name| !name.is_empty()) {
            return self.resolve_name(name, query.singleton);
        }

        if let Some(category) = query.category.as_deref().filter(|category| !category.is_empty())
        {
            return self.resolve_category(category, query.format);
        }

        Err(ResolutionError::UnresolvableQuery)
    }

    fn resolve_name(
        &mut self,
        name: &str,
        singleton_override: Option<bool>,
    ) -> Result<InstancePtr, ResolutionError> {
        let definition = self
            .definitions
            .get(name)
            .ok_or_else(|| ResolutionError::UnknownType(name.to_string()))?
            .clone();

        trace!(
            "Resolving '{name}' (construction required: {}).",
            definition.provider.requires_construction()
        );

        let dependencies: Vec<InstancePtr> = definition
            .dependencies
            .iter()
            .map(|dependency| self.resolve_query(dependency))
            .try_collect()?;

        match &definition.provider {
            Provider::Empty(marker) => Ok(marker.clone()),
            Provider::Value(stored) | Provider::Sequence(stored) => Ok(stored.clone()),
            Provider::Constructor(factory) => {
                // A true per-call override promotes to singleton; a false
                // one never demotes.
                let singleton = singleton_override.unwrap_or(false) || definition.singleton;

                if !singleton {
                    return factory(&dependencies);
                }

                if let Some(cached) = self.singletons.get(name) {
                    return Ok(cached.clone());
                }

                let constructed = factory(&dependencies)?;
                self.singletons
                    .insert(name.to_string(), constructed.clone());

                Ok(constructed)
            }
        }
    }

    fn resolve_category(
        &mut self,
        category: &str,
        format: CategoryFormat,
    ) -> Result<InstancePtr, ResolutionError> {
        let names = self
            .categories
            .get(category)
            .ok_or_else(|| ResolutionError::UnknownType(category.to_string()))?
            .clone();

        trace!("Resolving category '{category}' with {} members.", names.len());

        match format {
            CategoryFormat::Array => {
                let instances: Vec<InstancePtr> = names
                    .iter()
                    .map(|name| self.resolve_name(name, None))
                    .try_collect()?;

                Ok(instance(instances))
            }
            CategoryFormat::Literal => {
                let instances: FxHashMap<String, InstancePtr> = names
                    .iter()
                    .map(|name| {
                        self.resolve_name(name, None)
                            .map(|resolved| (name.clone(), resolved))
                    })
                    .try_collect()?;

                Ok(instance(instances))
            }
        }
    }
}
