use super::*;

fn frame_with_edge() -> RgbaImage {
    let mut img = RgbaImage::new(8, 4);
    for x in 2..6 {
        for y in 1..3 {
            img.put_pixel(x, y, image::Rgba([0, 255, 0, 255]));
        }
    }
    // Antialiased rim pixels.
    img.put_pixel(1, 1, image::Rgba([0, 255, 0, 1]));
    img.put_pixel(6, 2, image::Rgba([0, 255, 0, 90]));
    img
}

#[test]
fn only_fully_transparent_pixels_use_reserved_index() {
    let img = frame_with_edge();
    let q = quantize_with_transparency(&img, DEFAULT_SAMPLE_FACTOR).unwrap();

    assert_eq!(q.width, 8);
    assert_eq!(q.height, 4);
    assert_eq!(q.indices.len(), 32);

    for (i, px) in img.pixels().enumerate() {
        if px.0[3] == 0 {
            assert_eq!(q.indices[i], TRANSPARENT_INDEX, "pixel {i} should be clear");
        } else {
            assert_ne!(q.indices[i], TRANSPARENT_INDEX, "pixel {i} should be opaque");
        }
    }
    assert_eq!(q.transparent_pixels(), 32 - 8 - 2);
}

#[test]
fn palette_has_256_entries_with_black_transparent_slot() {
    let q = quantize_with_transparency(&frame_with_edge(), DEFAULT_SAMPLE_FACTOR).unwrap();
    assert_eq!(q.palette.len(), 256 * 3);
    let slot = TRANSPARENT_INDEX as usize * 3;
    assert_eq!(&q.palette[slot..slot + 3], &[0, 0, 0]);
}

#[test]
fn opaque_green_maps_to_a_green_entry() {
    let q = quantize_with_transparency(&frame_with_edge(), 1).unwrap();
    let idx = q.indices[8 + 3] as usize;
    let rgb = &q.palette[idx * 3..idx * 3 + 3];
    assert!(
        rgb[1] > rgb[0] && rgb[1] > rgb[2],
        "expected green-dominant entry, got {rgb:?}"
    );
}

#[test]
fn fully_opaque_frame_still_reserves_slot() {
    let img = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
    let q = quantize_with_transparency(&img, DEFAULT_SAMPLE_FACTOR).unwrap();
    assert_eq!(q.transparent_pixels(), 0);
    assert!(q.indices.iter().all(|&i| i != TRANSPARENT_INDEX));
    assert_eq!(q.palette.len(), 256 * 3);
}

#[test]
fn empty_frame_is_rejected() {
    let img = RgbaImage::new(0, 0);
    assert!(quantize_with_transparency(&img, DEFAULT_SAMPLE_FACTOR).is_err());
}
