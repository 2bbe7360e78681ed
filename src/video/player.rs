//! Playable media elements as seen by the gallery core.
//!
//! The render surface owns the concrete elements; the core only needs to read
//! and restore their transport state through [`MediaElement`].

use crate::error::{GalleryError, Result};
use crate::models::MediaHandle;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// A mounted, playable media element.
pub trait MediaElement {
    fn handle(&self) -> &MediaHandle;

    fn is_playing(&self) -> bool;

    /// Current position in seconds.
    fn position(&self) -> f64;

    fn seek(&mut self, position: f64);

    /// Starts playback. Fails when the handle cannot be resolved to media.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn toggle(&mut self) -> Result<()> {
        if self.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }
}

/// Element with no decoder behind it, used by the headless surface.
///
/// Mounting autoplays (muted, looped) when the handle resolves, matching how
/// gallery tiles behave in a real surface.
#[derive(Debug, Clone)]
pub struct HeadlessElement {
    handle: MediaHandle,
    resolvable: bool,
    state: PlaybackState,
    position: f64,
}

impl HeadlessElement {
    pub fn mount(handle: MediaHandle, resolvable: bool) -> Self {
        let state = if resolvable {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        };
        Self {
            handle,
            resolvable,
            state,
            position: 0.0,
        }
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state
    }

    /// Advances the clock of a playing element.
    pub fn advance(&mut self, seconds: f64) {
        if self.state == PlaybackState::Playing {
            self.position += seconds.max(0.0);
        }
    }
}

impl MediaElement for HeadlessElement {
    fn handle(&self) -> &MediaHandle {
        &self.handle
    }

    fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, position: f64) {
        self.position = position.max(0.0);
    }

    fn play(&mut self) -> Result<()> {
        if !self.resolvable {
            return Err(GalleryError::PlaybackResume {
                handle: self.handle.to_string(),
                reason: "media handle does not resolve".to_string(),
            });
        }
        self.state = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_autoplays_when_resolvable() {
        let element = HeadlessElement::mount(MediaHandle::new("blob:a"), true);
        assert!(element.is_playing());
        assert_eq!(element.position(), 0.0);

        let dead = HeadlessElement::mount(MediaHandle::new("blob:gone"), false);
        assert_eq!(dead.playback_state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_unresolvable_play_fails() {
        let mut element = HeadlessElement::mount(MediaHandle::new("blob:gone"), false);
        assert!(matches!(
            element.play(),
            Err(GalleryError::PlaybackResume { .. })
        ));
        assert!(!element.is_playing());
    }

    #[test]
    fn test_toggle_and_advance() {
        let mut element = HeadlessElement::mount(MediaHandle::new("blob:a"), true);
        element.advance(2.5);
        element.toggle().unwrap();
        assert_eq!(element.playback_state(), PlaybackState::Paused);
        element.advance(10.0);
        assert_eq!(element.position(), 2.5);

        element.toggle().unwrap();
        assert!(element.is_playing());
        element.seek(-3.0);
        assert_eq!(element.position(), 0.0);
    }
}
