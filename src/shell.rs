//! Shell binding: the whole surface a host needs to drive the engine.
//!
//! A mounted [`Shell`] owns the interaction store and the incremental
//! composer, and keeps an up-to-date widget tree after every dispatch.

use std::path::Path;
use std::sync::Arc;

use crate::actions::Action;
use crate::compose::{Composer, CompositionReport, WidgetTree};
use crate::descriptor::{Descriptors, ValidDescriptors, validate};
use crate::error::{MountError, ValidationError};
use crate::registry::Registry;
use crate::state::{InteractionState, Store};

pub struct Shell {
    descriptors: Arc<ValidDescriptors>,
    registry: Arc<Registry>,
    store: Store,
    composer: Composer,
    tree: Arc<WidgetTree>,
    last_report: CompositionReport,
}

impl Shell {
    /// Validate `descriptors` and run the first composition pass.
    pub fn mount(
        descriptors: Descriptors,
        registry: Arc<Registry>,
        initial: InteractionState,
    ) -> Result<Self, ValidationError> {
        let descriptors = validate(descriptors)?;
        Ok(Self::mount_valid(descriptors, registry, initial))
    }

    /// Load descriptors from a TOML file, validate and mount them.
    pub fn mount_path(
        path: impl AsRef<Path>,
        registry: Arc<Registry>,
        initial: InteractionState,
    ) -> Result<Self, MountError> {
        let descriptors = Descriptors::from_path(path)?;
        Ok(Self::mount(descriptors, registry, initial)?)
    }

    pub fn mount_valid(
        descriptors: ValidDescriptors,
        registry: Arc<Registry>,
        initial: InteractionState,
    ) -> Self {
        let descriptors = Arc::new(descriptors);
        let store = Store::new(initial);
        let mut composer = Composer::new();
        let (tree, last_report) =
            composer.recompose(&descriptors, store.state(), &registry.snapshot());
        tracing::debug!(
            menus = descriptors.menus.len(),
            compartments = descriptors.compartments.len(),
            "mounted shell"
        );
        Self {
            descriptors,
            registry,
            store,
            composer,
            tree,
            last_report,
        }
    }

    pub fn current_tree(&self) -> &Arc<WidgetTree> {
        &self.tree
    }

    pub fn state(&self) -> &InteractionState {
        self.store.state()
    }

    pub fn descriptors(&self) -> &ValidDescriptors {
        &self.descriptors
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn last_report(&self) -> CompositionReport {
        self.last_report
    }

    /// Apply `action` and re-derive the affected parts of the tree.
    pub fn dispatch(&mut self, action: Action) -> &Arc<WidgetTree> {
        self.store.dispatch(action);
        self.recompose()
    }

    /// Replace the descriptors (e.g. after menu reconfiguration). Invalid
    /// replacements are rejected and the current ones stay mounted.
    pub fn swap_descriptors(&mut self, descriptors: Descriptors) -> Result<(), ValidationError> {
        let descriptors = validate(descriptors)?;
        self.descriptors = Arc::new(descriptors);
        self.composer.invalidate();
        self.recompose();
        Ok(())
    }

    /// Recompose without a state change, picking up registry changes.
    pub fn refresh(&mut self) -> &Arc<WidgetTree> {
        self.recompose()
    }

    fn recompose(&mut self) -> &Arc<WidgetTree> {
        let snapshot = self.registry.snapshot();
        let (tree, report) = self
            .composer
            .recompose(&self.descriptors, self.store.state(), &snapshot);
        self.tree = tree;
        self.last_report = report;
        &self.tree
    }
}
