//! Widget-kind registry.
//!
//! The registry is an explicit instance, usually shared as `Arc<Registry>`
//! between the setup code that fills it and the shells that compose with
//! it. Mutation swaps in a fresh copy of the factory map, so a composition
//! pass holding a [`RegistrySnapshot`] never observes a registration that
//! happened after the pass started.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{FactoryError, RegistryError};
use crate::params::{ParamShape, WidgetParams};
use crate::widget::Widget;

/// Turns a tool entry's params into a widget.
pub trait WidgetFactory: Send + Sync {
    /// The params shape this factory accepts (`Empty` is always accepted as
    /// well, meaning "use defaults").
    fn shape(&self) -> ParamShape;

    fn build(&self, params: &WidgetParams) -> Result<Arc<dyn Widget>, FactoryError>;
}

struct FnFactory<F> {
    shape: ParamShape,
    build: F,
}

impl<F> WidgetFactory for FnFactory<F>
where
    F: Fn(&WidgetParams) -> Result<Arc<dyn Widget>, FactoryError> + Send + Sync,
{
    fn shape(&self) -> ParamShape {
        self.shape
    }

    fn build(&self, params: &WidgetParams) -> Result<Arc<dyn Widget>, FactoryError> {
        (self.build)(params)
    }
}

/// Wrap a closure as a shareable factory.
pub fn factory_fn<F>(shape: ParamShape, build: F) -> Arc<dyn WidgetFactory>
where
    F: Fn(&WidgetParams) -> Result<Arc<dyn Widget>, FactoryError> + Send + Sync + 'static,
{
    Arc::new(FnFactory { shape, build })
}

type FactoryMap = HashMap<String, Arc<dyn WidgetFactory>>;

/// Immutable view of the registry taken at the start of a composition pass.
#[derive(Clone, Default)]
pub struct RegistrySnapshot {
    generation: u64,
    factories: Arc<FactoryMap>,
}

impl RegistrySnapshot {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resolve(&self, kind: &str) -> Option<Arc<dyn WidgetFactory>> {
        self.factories.get(kind).cloned()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }
}

impl fmt::Debug for RegistrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySnapshot")
            .field("generation", &self.generation)
            .field("kinds", &sorted_kinds(&self.factories))
            .finish()
    }
}

#[derive(Default)]
pub struct Registry {
    current: RwLock<RegistrySnapshot>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `kind`.
    ///
    /// Registering the very same factory instance again is a no-op so setup
    /// code may run more than once; a different factory for a taken kind is a
    /// conflict and leaves the existing registration in place.
    pub fn register(
        &self,
        kind: impl Into<String>,
        factory: Arc<dyn WidgetFactory>,
    ) -> Result<(), RegistryError> {
        let kind = kind.into();
        if kind.trim().is_empty() {
            return Err(RegistryError::EmptyKind);
        }
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = current.factories.get(&kind) {
            if Arc::ptr_eq(existing, &factory) {
                return Ok(());
            }
            tracing::warn!(%kind, "widget kind already registered");
            return Err(RegistryError::Conflict { kind });
        }
        let mut factories = FactoryMap::clone(&current.factories);
        tracing::debug!(%kind, shape = %factory.shape(), "registered widget kind");
        factories.insert(kind, factory);
        *current = RegistrySnapshot {
            generation: current.generation + 1,
            factories: Arc::new(factories),
        };
        Ok(())
    }

    pub fn resolve(&self, kind: &str) -> Option<Arc<dyn WidgetFactory>> {
        self.snapshot().resolve(kind)
    }

    /// Remove `kind`. Returns whether it was registered. Widgets already
    /// built from it stay in existing trees until the next composition pass.
    pub fn unregister(&self, kind: &str) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if !current.factories.contains_key(kind) {
            return false;
        }
        let mut factories = FactoryMap::clone(&current.factories);
        factories.remove(kind);
        *current = RegistrySnapshot {
            generation: current.generation + 1,
            factories: Arc::new(factories),
        };
        tracing::debug!(%kind, "unregistered widget kind");
        true
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn kinds(&self) -> Vec<String> {
        sorted_kinds(&self.snapshot().factories)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

fn sorted_kinds(map: &FactoryMap) -> Vec<String> {
    let mut kinds: Vec<String> = map.keys().cloned().collect();
    kinds.sort();
    kinds
}
