use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use vidgal::layout::RenderPlan;
use vidgal::models::{GalleryState, MediaPersistence, MediaReferenceStore, MemoryStore};
use vidgal::{GalleryConfig, GallerySession, HeadlessSurface};

fn open_store(config: &GalleryConfig) -> Box<dyn MediaPersistence> {
    let opened = config
        .store_path()
        .and_then(|path| MediaReferenceStore::open(&path));

    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Reference store unavailable, gallery will not persist: {:#}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn describe(plan: &RenderPlan) {
    match plan {
        RenderPlan::Masonry(masonry) => {
            for (column, tiles) in masonry.columns.iter().enumerate() {
                let labels: Vec<&str> = tiles.tiles.iter().map(|t| t.entry.label.as_str()).collect();
                info!("column {}: {}", column + 1, labels.join(", "));
            }
        }
        RenderPlan::EmptySlideshow { message } => info!("{}", message),
        other => info!("{} entries mounted", other.mounted_entries().len()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vidgal=info".parse()?),
        )
        .init();

    let config = GalleryConfig::from_env();
    let state = GalleryState::hydrate(open_store(&config));
    let mut session = GallerySession::new(state, config.layout.clone(), HeadlessSurface::new());

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if !paths.is_empty() {
        let added = session.add_paths(&paths);
        info!("Added {} of {} files", added, paths.len());
    }

    info!(
        "{} videos in {} layout",
        session.state().len(),
        session.state().layout_mode()
    );
    describe(session.render());

    Ok(())
}
