//! Minimal example: draw, export a PNG and upload it to a running store
//!
//!     cargo run --example draw_and_save -- http://127.0.0.1:8000

use pixel_pantry::editor::{Color, DrawMode, Editor};
use pixel_pantry::gallery::GalleryClient;
use pixel_pantry::ClientConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = std::env::args().nth(1).unwrap_or_else(|| "http://127.0.0.1:8000".to_string());

    let mut editor = Editor::new(8, 8);
    editor.set_color("#3366ff".parse::<Color>()?);
    editor.drag_paint((0..8).map(|i| (i, i)));
    editor.drag_paint((0..8).map(|i| (7 - i, i)));
    editor.set_mode(DrawMode::Erase);
    editor.paint(3, 3);

    let path = editor.export_download(&std::env::temp_dir())?;
    println!("Wrote {}", path.display());

    let client = GalleryClient::new(ClientConfig {
        base_url: base,
        timeout_ms: 5_000,
        ..Default::default()
    })?;

    // The store may not be running; report and carry on
    let raster = editor.rasterize(16)?;
    match client.save(&raster.to_data_url(), editor.width(), editor.height()) {
        Ok(art) => println!("Saved #{} -> {}", art.id, art.url),
        Err(e) => eprintln!("Save failed: {}", e),
    }

    match client.list() {
        Ok(items) => println!("Gallery has {} artwork(s)", items.len()),
        Err(e) => eprintln!("Failed to load gallery: {}", e),
    }
    Ok(())
}
