use autorot::{AutorotError, ColorSource, ImageView, Rgb8, RgbImage};

fn ramp(len: usize) -> Vec<Rgb8> {
    (0..len).map(|i| [i as u8, (i * 2) as u8, 7]).collect()
}

#[test]
fn image_view_allows_empty_dimensions() {
    let data: [Rgb8; 0] = [];
    let view = ImageView::from_slice(&data, 0, 3).unwrap();
    assert!(view.is_empty());
    assert_eq!(view.row(0), None);
    assert_eq!(view.get(0, 0), None);

    let view = ImageView::from_slice(&data, 4, 0).unwrap();
    assert!(view.is_empty());
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = ramp(8);
    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        AutorotError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = ramp(3);
    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, AutorotError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn strided_view_reads_rows_and_colors() {
    // 3x2 image stored with a stride of 4 (one padding pixel per row).
    let data = ramp(8);
    let view = ImageView::new(&data, 3, 2, 4).unwrap();
    assert_eq!(view.row(1).unwrap(), &data[4..7]);
    assert_eq!(view.get(2, 1), Some(&data[6]));
    assert_eq!(view.get(3, 1), None);
    assert_eq!(ColorSource::color_at(&view, 1, 1).to_rgb8(), data[5]);

    let owned = RgbImage::from_view(view);
    assert_eq!(owned.width(), 3);
    assert_eq!(owned.height(), 2);
    assert_eq!(owned.data(), &[data[0], data[1], data[2], data[4], data[5], data[6]]);
}

#[test]
fn owned_image_requires_exact_length() {
    assert_eq!(
        RgbImage::new(ramp(5), 3, 2).err().unwrap(),
        AutorotError::BufferTooSmall { needed: 6, got: 5 }
    );
    assert_eq!(
        RgbImage::new(ramp(7), 3, 2).err().unwrap(),
        AutorotError::InvalidDimensions {
            width: 3,
            height: 2,
        }
    );
    assert_eq!(
        RgbImage::new(Vec::new(), usize::MAX, 2).err().unwrap(),
        AutorotError::InvalidDimensions {
            width: usize::MAX,
            height: 2,
        }
    );

    let img = RgbImage::new(ramp(6), 3, 2).unwrap();
    assert_eq!(img.pixel(2, 1), Some(ramp(6)[5]));
    assert_eq!(img.pixel(3, 0), None);
    assert_eq!(img.view().stride(), 3);
}
