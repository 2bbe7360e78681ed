use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tempfile::tempdir;

use vidgal::config::LayoutConfig;
use vidgal::layout::LayoutMode;
use vidgal::models::{GalleryState, MediaCandidate, MediaHandle, MediaReferenceStore};
use vidgal::ui::{Key, KeyboardSurface, RenderSurface};
use vidgal::{mount_gallery, GallerySession, HeadlessSurface};

fn video(name: &str) -> MediaCandidate {
    MediaCandidate::new(
        format!("{name}.mp4"),
        "video/mp4",
        MediaHandle::new(format!("blob:{name}")),
    )
}

fn session_with(
    surface: HeadlessSurface,
    names: &[&str],
) -> GallerySession<HeadlessSurface> {
    let store = MediaReferenceStore::open_in_memory().unwrap();
    let state = GalleryState::hydrate(Box::new(store));
    let mut session = GallerySession::new(state, LayoutConfig::default(), surface);
    session.add_candidates(names.iter().map(|n| video(n)));
    session
}

#[test]
fn grid_to_slideshow_and_back_keeps_play_flags() {
    let mut session = session_with(HeadlessSurface::new(), &["a", "b", "c"]);
    let a = MediaHandle::new("blob:a");
    let b = MediaHandle::new("blob:b");

    {
        let registry = session.surface_mut().registry_mut();
        let element = registry.get_mut(&b).unwrap();
        element.seek(21.0);
        element.pause();
        registry.get_mut(&a).unwrap().seek(4.0);
    }
    session.set_focused_index(1);

    let report = session.set_layout_mode(LayoutMode::Slideshow);
    assert_eq!(report.restored, 1);
    assert_eq!(report.dropped, 2);
    let focused = session.surface().registry().get(&b).unwrap();
    assert!(!focused.is_playing());
    assert_eq!(focused.position(), 21.0);

    let report = session.set_layout_mode(LayoutMode::Grid);
    assert_eq!(report.restored, 1);
    let registry = session.surface().registry();
    assert_eq!(registry.len(), 3);
    let b_element = registry.get(&b).unwrap();
    assert!(!b_element.is_playing());
    assert_eq!(b_element.position(), 21.0);
    // Items not mounted in the slideshow come back fresh.
    assert!(registry.get(&a).unwrap().is_playing());
}

#[test]
fn failed_resume_leaves_element_paused() {
    let revoked = Rc::new(Cell::new(false));
    let flag = revoked.clone();
    let surface =
        HeadlessSurface::with_resolver(move |h| !(flag.get() && h.as_str() == "blob:revoked"));
    let mut session = session_with(surface, &["ok", "revoked"]);

    // Both tiles play in the grid, then one handle goes away before the remount.
    revoked.set(true);
    let report = session.set_layout_mode(LayoutMode::Circle);
    assert_eq!(report.restored, 1);
    assert_eq!(report.resume_failures, vec![MediaHandle::new("blob:revoked")]);

    let registry = session.surface().registry();
    assert!(registry.get(&MediaHandle::new("blob:ok")).unwrap().is_playing());
    assert!(!registry.get(&MediaHandle::new("blob:revoked")).unwrap().is_playing());
}

#[test]
fn persisted_list_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gallery.sqlite");

    {
        let store = MediaReferenceStore::open(&path).unwrap();
        let state = GalleryState::hydrate(Box::new(store));
        let mut session = GallerySession::new(state, LayoutConfig::default(), HeadlessSurface::new());
        session.add_candidates(["one", "two", "three"].iter().map(|n| video(n)));
        session.remove_item(1).unwrap();
    }

    let store = MediaReferenceStore::open(&path).unwrap();
    let state = GalleryState::hydrate(Box::new(store));
    let names: Vec<&str> = state
        .items()
        .iter()
        .map(|i| i.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["one.mp4", "three.mp4"]);
}

#[test]
fn unmounting_detaches_keyboard() {
    let keyboard = KeyboardSurface::new();
    let session = Rc::new(RefCell::new(session_with(
        HeadlessSurface::new(),
        &["a", "b", "c", "d", "e"],
    )));

    let mounted = mount_gallery(session.clone(), &keyboard);
    session.borrow_mut().set_layout_mode(LayoutMode::SplitScreen);

    assert!(keyboard.dispatch(&Key::Character('3')));
    assert_eq!(session.borrow().plan().unwrap().column_count(), Some(3));
    assert!(keyboard.dispatch(&Key::Character('0')));
    assert_eq!(session.borrow().plan().unwrap().column_count(), Some(2));

    drop(mounted);
    assert!(!keyboard.dispatch(&Key::Character('1')));
    assert_eq!(session.borrow().plan().unwrap().column_count(), Some(2));
}
