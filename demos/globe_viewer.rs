//! Interactive globe viewer demo.
//!
//! Usage: globe_viewer [DAY_MAP] [CLOUD_MAP]
//!
//! Both arguments are optional paths to equirectangular textures (for
//! example the 8k Earth day map and cloud map). Without them the globe
//! renders with a solid ocean color and no cloud layer.

use std::path::PathBuf;
use terraglobe_viewer::{GlobeViewer, ViewerConfig};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let day_map = args.next().map(PathBuf::from);
    let cloud_map = args.next().map(PathBuf::from);

    println!("Starting terraglobe viewer...");
    println!("  drag to orbit, scroll to zoom, click a pin for its label, 'r' resets");
    match &day_map {
        Some(path) => println!("  day map: {}", path.display()),
        None => println!("  day map: none (solid color fallback)"),
    }

    let config = ViewerConfig {
        day_map,
        cloud_map,
        ..ViewerConfig::default()
    };

    GlobeViewer::new(config)?.run()?;
    Ok(())
}
