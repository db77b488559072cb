use pixel_pantry::editor::{Color, Grid};
use pixel_pantry::rendering::rasterize;

#[test]
fn smoke_rasterize_empty_grid() {
    let r = rasterize(&Grid::new(64, 4), 2).unwrap();
    assert_eq!(r.width, 128);
    assert_eq!(r.height, 8);
    assert!(r.to_data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
}

#[test]
fn smoke_single_block_position() {
    let mut g = Grid::new(4, 4);
    g.set(3, 0, Some(Color::rgb(0, 0, 255)));
    let r = rasterize(&g, 5).unwrap();
    let img = image::load_from_memory(&r.png_data).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(15, 0).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(19, 4).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(14, 0).0[3], 0);
    assert_eq!(img.get_pixel(15, 5).0[3], 0);
}
