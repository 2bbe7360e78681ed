use std::collections::HashMap;

use crate::models::MediaHandle;
use crate::video::player::MediaElement;

/// Mounted media elements keyed by handle.
///
/// Owned by the render surface. The playback bridge only borrows it. Items
/// sharing a handle share a slot and the most recently mounted element wins.
#[derive(Default)]
pub struct MediaElementRegistry {
    elements: HashMap<MediaHandle, Box<dyn MediaElement>>,
}

impl std::fmt::Debug for MediaElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaElementRegistry")
            .field("handles", &self.handles())
            .finish()
    }
}

impl MediaElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `element` under its handle, replacing any previous one.
    pub fn register(&mut self, element: Box<dyn MediaElement>) -> Option<Box<dyn MediaElement>> {
        let handle = element.handle().clone();
        self.elements.insert(handle, element)
    }

    pub fn unregister(&mut self, handle: &MediaHandle) -> Option<Box<dyn MediaElement>> {
        self.elements.remove(handle)
    }

    pub fn get(&self, handle: &MediaHandle) -> Option<&dyn MediaElement> {
        self.elements.get(handle).map(|e| e.as_ref())
    }

    pub fn get_mut(&mut self, handle: &MediaHandle) -> Option<&mut (dyn MediaElement + 'static)> {
        self.elements.get_mut(handle).map(|e| e.as_mut())
    }

    pub fn contains(&self, handle: &MediaHandle) -> bool {
        self.elements.contains_key(handle)
    }

    /// Registered handles in sorted order.
    pub fn handles(&self) -> Vec<MediaHandle> {
        let mut handles: Vec<MediaHandle> = self.elements.keys().cloned().collect();
        handles.sort();
        handles
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MediaHandle, &dyn MediaElement)> {
        self.elements.iter().map(|(h, e)| (h, e.as_ref()))
    }

    /// Drops every element whose handle is not in `keep`.
    pub fn retain(&mut self, keep: &[MediaHandle]) {
        self.elements.retain(|handle, _| keep.contains(handle));
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::player::HeadlessElement;

    fn element(url: &str) -> Box<dyn MediaElement> {
        Box::new(HeadlessElement::mount(MediaHandle::new(url), true))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MediaElementRegistry::new();
        assert!(registry.register(element("blob:a")).is_none());
        registry.register(element("blob:b"));

        assert_eq!(registry.len(), 2);
        assert!(registry.get(&MediaHandle::new("blob:a")).unwrap().is_playing());
        assert!(registry.get(&MediaHandle::new("blob:c")).is_none());

        registry.get_mut(&MediaHandle::new("blob:a")).unwrap().pause();
        assert!(!registry.get(&MediaHandle::new("blob:a")).unwrap().is_playing());
    }

    #[test]
    fn test_duplicate_handle_replaces() {
        let mut registry = MediaElementRegistry::new();
        registry.register(element("blob:a"));
        registry.get_mut(&MediaHandle::new("blob:a")).unwrap().seek(9.0);

        let previous = registry.register(element("blob:a")).unwrap();
        assert_eq!(previous.position(), 9.0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&MediaHandle::new("blob:a")).unwrap().position(), 0.0);
    }

    #[test]
    fn test_retain_and_unregister() {
        let mut registry = MediaElementRegistry::new();
        for url in ["blob:a", "blob:b", "blob:c"] {
            registry.register(element(url));
        }

        registry.retain(&[MediaHandle::new("blob:a"), MediaHandle::new("blob:c")]);
        assert_eq!(
            registry.handles(),
            vec![MediaHandle::new("blob:a"), MediaHandle::new("blob:c")]
        );

        assert!(registry.unregister(&MediaHandle::new("blob:a")).is_some());
        assert!(!registry.contains(&MediaHandle::new("blob:a")));
        registry.clear();
        assert!(registry.is_empty());
    }
}
