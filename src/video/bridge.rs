//! Carries playback state across a layout switch.
//!
//! Switching layouts tears down every mounted element and mounts new ones, so
//! transport state is captured from the old registry before the surface
//! re-renders and pushed into the new elements afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::layout::LayoutMode;
use crate::models::MediaHandle;
use crate::video::registry::MediaElementRegistry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackCapture {
    pub is_playing: bool,
    pub position_seconds: f64,
}

/// Captured transport state keyed by handle.
pub type PlaybackSnapshot = HashMap<MediaHandle, PlaybackCapture>;

/// An in-flight layout switch.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTransition {
    pub from: LayoutMode,
    pub to: LayoutMode,
    pub snapshot: PlaybackSnapshot,
}

/// Outcome of [`complete_layout_transition`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    /// Elements whose position and play flag were restored
    pub restored: usize,
    /// Captured handles with no element in the new layout
    pub dropped: usize,
    /// Elements that should have resumed but refused to play
    pub resume_failures: Vec<MediaHandle>,
}

/// Captures the playback state of every registered element.
///
/// Must run before the surface presents the new plan.
pub fn begin_layout_transition(
    registry: &MediaElementRegistry,
    from: LayoutMode,
    to: LayoutMode,
) -> LayoutTransition {
    let snapshot: PlaybackSnapshot = registry
        .iter()
        .map(|(handle, element)| {
            (
                handle.clone(),
                PlaybackCapture {
                    is_playing: element.is_playing(),
                    position_seconds: element.position(),
                },
            )
        })
        .collect();

    debug!(
        "Captured {} playback states for {} -> {}",
        snapshot.len(),
        from,
        to
    );

    LayoutTransition { from, to, snapshot }
}

/// Restores captured state onto the elements mounted by the new layout.
pub fn complete_layout_transition(
    transition: LayoutTransition,
    registry: &mut MediaElementRegistry,
) -> RestoreReport {
    let mut report = RestoreReport::default();

    for (handle, capture) in transition.snapshot {
        let Some(element) = registry.get_mut(&handle) else {
            report.dropped += 1;
            continue;
        };

        element.seek(capture.position_seconds);
        if capture.is_playing {
            if let Err(e) = element.play() {
                debug!("Resume failed for {}: {}", handle, e);
                element.pause();
                report.resume_failures.push(handle);
                continue;
            }
        } else {
            element.pause();
        }
        report.restored += 1;
    }

    report.resume_failures.sort();
    debug!(
        "Layout {} -> {}: restored {}, dropped {}, failed {}",
        transition.from,
        transition.to,
        report.restored,
        report.dropped,
        report.resume_failures.len()
    );

    report
}
