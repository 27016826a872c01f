//! Type-erased instance and factory pointers shared between definitions and
//! the [Container](crate::container::Container). Registered values, resolved
//! instances, and category aggregates all travel as [InstancePtr], which
//! keeps the resolution algorithm uniform regardless of the concrete types
//! involved.

use crate::error::ResolutionError;
use std::any::{type_name, Any};
use std::sync::Arc;

/// Type-erased shared pointer to a resolved instance.
pub type InstancePtr = Arc<dyn Any + Send + Sync>;

/// Type-erased factory invoked with the resolved dependency list.
pub type FactoryPtr =
    Arc<dyn Fn(&[InstancePtr]) -> Result<InstancePtr, ResolutionError> + Send + Sync>;

/// Decorator wrapping a factory at registration time.
pub type AspectFn = Box<dyn Fn(FactoryPtr) -> FactoryPtr + Send + Sync>;

/// Marker resolved from definitions registered without a source value,
/// distinguishing "no value" from "not yet defined".
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Empty;

/// Wraps a plain value into a shareable, type-erased instance.
pub fn instance<T: Send + Sync + 'static>(value: T) -> InstancePtr {
    Arc::new(value)
}

/// Downcasts a type-erased instance to a concrete type.
pub fn downcast<T: Send + Sync + 'static>(instance: InstancePtr) -> Result<Arc<T>, ResolutionError> {
    instance
        .downcast()
        .map_err(|_| ResolutionError::IncompatibleInstance(type_name::<T>()))
}
