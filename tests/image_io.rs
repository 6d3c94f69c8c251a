#![cfg(feature = "image-io")]

use autorot::io::{load_rgb_image, owned_from_dynamic_image, save_rgb_image, to_rgb_image};
use autorot::{rotate, AutorotError, RgbImage};

#[test]
fn png_round_trip_preserves_pixels() {
    let data: Vec<[u8; 3]> = (0..48u8).map(|i| [i, i.wrapping_mul(5), 255 - i]).collect();
    let img = RgbImage::new(data, 8, 6).unwrap();

    let path = std::env::temp_dir().join(format!("autorot-io-{}.png", std::process::id()));
    save_rgb_image(&img, &path).unwrap();
    let loaded = load_rgb_image(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, img);
}

#[test]
fn dynamic_images_convert_and_rotate() {
    let buffer = image::RgbaImage::from_pixel(9, 5, image::Rgba([10, 20, 30, 0]));
    let dynamic = image::DynamicImage::ImageRgba8(buffer);
    let owned = owned_from_dynamic_image(&dynamic).unwrap();
    assert_eq!((owned.width(), owned.height()), (9, 5));
    assert!(owned.data().iter().all(|&px| px == [10, 20, 30]));

    let native = to_rgb_image(&owned).unwrap();
    let rotated = rotate(&native, 0.0, None);
    assert_eq!((rotated.width(), rotated.height()), (5, 5));
    assert!(rotated.data().iter().all(|&px| px == [10, 20, 30]));
}

#[test]
fn missing_files_and_empty_images_are_io_errors() {
    let err = load_rgb_image("/nonexistent/autorot.png").err().unwrap();
    assert!(matches!(err, AutorotError::ImageIo { .. }));
    let err = save_rgb_image(&RgbImage::empty(), "unused.png").err().unwrap();
    assert!(matches!(err, AutorotError::ImageIo { .. }));
}
