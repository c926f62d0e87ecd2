use super::*;

#[test]
fn luma_round_trip_keeps_samples_and_shape() {
    let img = GrayImage::from_fn(5, 3, |x, y| image::Luma([(x * 10 + y) as u8]));
    let buf = PixelBuffer::from_luma8(img.clone()).unwrap();
    assert_eq!((buf.width(), buf.height()), (5, 3));
    assert_eq!(buf.get(4, 2), 42);

    let back = buf.into_luma8().unwrap();
    assert_eq!(back, img);
}

#[test]
fn dynamic_rgb_is_reduced_to_luma() {
    let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]));
    let buf = PixelBuffer::from_dynamic(&DynamicImage::ImageRgb8(rgb)).unwrap();
    assert_eq!(buf.as_raw(), &[255, 255, 255, 255]);
}

#[test]
fn empty_buffer_converts_to_empty_image() {
    let img = PixelBuffer::empty().into_luma8().unwrap();
    assert_eq!(img.dimensions(), (0, 0));
}
