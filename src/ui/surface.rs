//! Render surfaces: where plans become mounted media elements.

use tracing::{debug, trace};

use crate::layout::{LayoutMode, RenderPlan};
use crate::models::MediaHandle;
use crate::video::{HeadlessElement, MediaElementRegistry};

/// A host that can display a [`RenderPlan`].
///
/// The surface owns the element registry. Presenting a plan of a different
/// mode tears down every element and mounts fresh ones.
pub trait RenderSurface {
    fn present(&mut self, plan: &RenderPlan);

    fn registry(&self) -> &MediaElementRegistry;

    fn registry_mut(&mut self) -> &mut MediaElementRegistry;
}

/// Decides whether a handle still resolves to playable bytes
pub type ResolvePredicate = Box<dyn Fn(&MediaHandle) -> bool>;

/// Surface with no window behind it, mounting [`HeadlessElement`]s.
pub struct HeadlessSurface {
    registry: MediaElementRegistry,
    mounted_mode: Option<LayoutMode>,
    last_plan: Option<RenderPlan>,
    resolvable: ResolvePredicate,
    presents: usize,
}

impl std::fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("registry", &self.registry)
            .field("mounted_mode", &self.mounted_mode)
            .field("presents", &self.presents)
            .finish()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSurface {
    /// Surface where every handle resolves.
    pub fn new() -> Self {
        Self::with_resolver(|_| true)
    }

    pub fn with_resolver<F>(resolvable: F) -> Self
    where
        F: Fn(&MediaHandle) -> bool + 'static,
    {
        Self {
            registry: MediaElementRegistry::new(),
            mounted_mode: None,
            last_plan: None,
            resolvable: Box::new(resolvable),
            presents: 0,
        }
    }

    /// The plan most recently presented.
    pub fn last_plan(&self) -> Option<&RenderPlan> {
        self.last_plan.as_ref()
    }

    pub fn present_count(&self) -> usize {
        self.presents
    }

    fn mount(&mut self, handle: MediaHandle) {
        let resolvable = (self.resolvable)(&handle);
        trace!("Mounting {} (resolvable: {})", handle, resolvable);
        self.registry
            .register(Box::new(HeadlessElement::mount(handle, resolvable)));
    }
}

impl RenderSurface for HeadlessSurface {
    fn present(&mut self, plan: &RenderPlan) {
        let mode = plan.mode();
        let handles = plan.mounted_handles();

        if self.mounted_mode != Some(mode) {
            self.registry.clear();
            // Duplicate handles mount twice; the later element replaces the earlier.
            for handle in handles {
                self.mount(handle);
            }
        } else {
            self.registry.retain(&handles);
            for handle in handles {
                if !self.registry.contains(&handle) {
                    self.mount(handle);
                }
            }
        }

        self.mounted_mode = Some(mode);
        self.last_plan = Some(plan.clone());
        self.presents += 1;
        debug!(
            "Presented {} with {} mounted elements",
            mode,
            self.registry.len()
        );
    }

    fn registry(&self) -> &MediaElementRegistry {
        &self.registry
    }

    fn registry_mut(&mut self) -> &mut MediaElementRegistry {
        &mut self.registry
    }
}
