mod common;

use common::{gray, gray_from_fn, noise, rgb_from_fn, rgba_from_fn};
use rand::{SeedableRng, rngs::StdRng};
use voxelkit::{ColorSpace, EdgeOperator, Filter, FilterError, PixelBuffer};

fn mean(img: &PixelBuffer) -> f64 {
    img.data().iter().map(|&v| f64::from(v)).sum::<f64>() / img.data().len() as f64
}

fn alpha(img: &PixelBuffer) -> Vec<u8> {
    img.data().chunks_exact(4).map(|px| px[3]).collect()
}

#[test_log::test]
fn brightness_round_trips_without_clamping() {
    let original = gray_from_fn(8, 8, |x, y| 50 + (x * 8 + y * 2) as u8);
    let mut img = original.clone();
    Filter::adjust_brightness(&mut img, 40);
    Filter::adjust_brightness(&mut img, -40);
    assert_eq!(img, original);
}

#[test_log::test]
fn brightness_saturates_at_both_ends() {
    let mut img = gray(4, 1, &[0, 10, 245, 255]);
    Filter::adjust_brightness(&mut img, 20);
    assert_eq!(img.data(), &[20, 30, 255, 255]);
    Filter::adjust_brightness(&mut img, -300);
    assert_eq!(img.data(), &[0, 0, 0, 0]);
}

#[test_log::test]
fn brightness_skips_alpha() {
    let mut img = rgba_from_fn(3, 3, |x, y| [10, 20, 30, (x * 40 + y) as u8]);
    let before = alpha(&img);
    Filter::adjust_brightness(&mut img, 100);
    assert_eq!(alpha(&img), before);
    assert!(img.data().chunks_exact(4).all(|px| px[..3] == [110, 120, 130]));
}

#[test_log::test]
fn auto_brightness_centres_the_mean() {
    let mut img = gray_from_fn(16, 16, |x, y| 20 + ((x * 7 + y * 3) % 100) as u8);
    Filter::auto_adjust_brightness(&mut img);
    let centred = mean(&img);
    assert!((centred - 128.0).abs() <= 1.0, "mean {centred}");
}

#[test_log::test]
fn auto_brightness_ignores_alpha_in_the_mean() {
    let mut img = rgba_from_fn(4, 4, |_, _| [100, 100, 100, 255]);
    Filter::auto_adjust_brightness(&mut img);
    assert!(img.data().chunks_exact(4).all(|px| px == [128, 128, 128, 255]));
}

#[test_log::test]
fn zero_density_noise_changes_nothing() {
    let original = noise(10, 10, 3);
    let mut img = original.clone();
    Filter::add_salt_and_pepper(&mut img, 0.0).unwrap();
    assert_eq!(img, original);
}

#[test_log::test]
fn full_density_noise_hits_every_pixel() {
    let mut img = PixelBuffer::filled(4, 4, 1, 128).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    Filter::add_salt_and_pepper_with_rng(&mut img, 1.0, &mut rng).unwrap();
    assert!(img.data().iter().all(|&v| v == 0 || v == 255));
}

#[test_log::test]
fn noise_changes_exactly_the_requested_pixel_count() {
    let mut img = PixelBuffer::filled(10, 10, 3, 128).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    Filter::add_salt_and_pepper_with_rng(&mut img, 0.25, &mut rng).unwrap();

    let changed: Vec<&[u8]> = img
        .data()
        .chunks_exact(3)
        .filter(|px| px[0] != 128)
        .collect();
    assert_eq!(changed.len(), 25);
    assert!(changed.iter().all(|px| px == &[0, 0, 0] || px == &[255, 255, 255]));
}

#[test_log::test]
fn noise_leaves_alpha_alone() {
    let mut img = PixelBuffer::filled(6, 6, 4, 128).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    Filter::add_salt_and_pepper_with_rng(&mut img, 0.5, &mut rng).unwrap();
    assert!(alpha(&img).iter().all(|&a| a == 128));
}

#[test_log::test]
fn invalid_density_is_rejected_before_mutation() {
    let original = noise(5, 5, 9);
    let mut img = original.clone();
    assert!(matches!(
        Filter::add_salt_and_pepper(&mut img, 1.5),
        Err(FilterError::InvalidDensity(_))
    ));
    assert_eq!(img, original);
}

#[test_log::test]
fn median_with_unit_kernel_is_identity() {
    let original = noise(9, 7, 11);
    let mut img = original.clone();
    Filter::median_blur(&mut img, 1).unwrap();
    assert_eq!(img, original);
}

#[test_log::test]
fn median_removes_an_isolated_impulse() {
    let mut img = gray_from_fn(5, 5, |x, y| if (x, y) == (2, 2) { 255 } else { 10 });
    Filter::median_blur(&mut img, 3).unwrap();
    assert!(img.data().iter().all(|&v| v == 10));
}

#[test_log::test]
fn median_replicates_border_pixels() {
    let mut img = gray(3, 1, &[0, 90, 90]);
    Filter::median_blur(&mut img, 3).unwrap();
    // the left edge sees 0, 0, 90 rather than just 0, 90
    assert_eq!(img.data(), &[0, 90, 90]);

    let mut img = gray(3, 1, &[0, 0, 90]);
    Filter::median_blur(&mut img, 3).unwrap();
    assert_eq!(img.data(), &[0, 0, 90]);
}

#[test_log::test]
fn median_leaves_alpha_alone() {
    let mut img = rgba_from_fn(5, 4, |x, y| {
        [(x * 50) as u8, (y * 60) as u8, 7, (x * 13 + y * 29) as u8]
    });
    let before = alpha(&img);
    Filter::median_blur(&mut img, 3).unwrap();
    assert_eq!(img.dim(), (4, 5, 4));
    assert_eq!(alpha(&img), before);
}

#[test_log::test]
fn median_rejects_even_kernels() {
    let mut img = noise(4, 4, 0);
    assert!(matches!(
        Filter::median_blur(&mut img, 4),
        Err(FilterError::InvalidKernelSize(4))
    ));
}

#[test_log::test]
fn box_blur_averages_only_in_bounds_samples() {
    let mut img = gray(3, 1, &[0, 30, 90]);
    Filter::box_blur(&mut img, 3).unwrap();
    assert_eq!(img.data(), &[15, 40, 60]);
}

#[test_log::test]
fn box_blur_keeps_shape_and_alpha() {
    let mut img = rgba_from_fn(7, 5, |x, y| {
        [(x * 30) as u8, (y * 40) as u8, 200, (x * 10 + y) as u8]
    });
    let before = alpha(&img);
    Filter::box_blur(&mut img, 5).unwrap();
    assert_eq!(img.dim(), (5, 7, 4));
    assert_eq!(alpha(&img), before);
}

#[test_log::test]
fn gaussian_blur_keeps_flat_images_and_alpha() {
    let mut img = rgba_from_fn(6, 6, |x, _| [100, 150, 200, (x * 20) as u8]);
    let before = alpha(&img);
    Filter::gaussian_blur_2d(&mut img, 5, 1.5).unwrap();
    assert_eq!(img.dim(), (6, 6, 4));
    assert_eq!(alpha(&img), before);
    assert!(img.data().chunks_exact(4).all(|px| px[..3] == [100, 150, 200]));
}

#[test_log::test]
fn gaussian_blur_smooths_every_colour_channel() {
    let mut img = rgb_from_fn(9, 1, |x, _| if x == 4 { [255, 255, 255] } else { [0, 0, 0] });
    Filter::gaussian_blur_2d(&mut img, 3, 1.0).unwrap();
    let centre = &img.data()[4 * 3..5 * 3];
    let neighbour = &img.data()[3 * 3..4 * 3];
    assert!(centre.iter().all(|&v| v > 0 && v < 255));
    assert!(neighbour.iter().all(|&v| v > 0));
    assert_eq!(centre[0], centre[1]);
    assert_eq!(centre[1], centre[2]);
}

#[test_log::test]
fn gaussian_blur_survives_kernels_wider_than_the_image() {
    let mut img = gray(2, 2, &[0, 100, 200, 50]);
    Filter::gaussian_blur_2d(&mut img, 7, 2.0).unwrap();
    assert_eq!(img.dim(), (2, 2, 1));
}

#[test_log::test]
fn gaussian_blur_rejects_non_positive_sigma() {
    let mut img = noise(4, 4, 2);
    assert!(matches!(
        Filter::gaussian_blur_2d(&mut img, 3, 0.0),
        Err(FilterError::InvalidSigma(_))
    ));
}

#[test_log::test]
fn equalising_a_flat_gray_image_saturates_it() {
    let mut img = PixelBuffer::filled(5, 5, 1, 37).unwrap();
    Filter::histogram_equalization(&mut img, ColorSpace::Hsv).unwrap();
    assert!(img.data().iter().all(|&v| v == 255));
}

#[test_log::test]
fn gray_equalisation_rounds_the_cdf() {
    let mut img = gray(2, 1, &[10, 200]);
    Filter::histogram_equalization(&mut img, ColorSpace::Hsv).unwrap();
    assert_eq!(img.data(), &[128, 255]);
}

#[test_log::test]
fn colour_equalisation_stretches_intensity_only() {
    let levels = [50u8, 100, 150, 200];
    for space in [ColorSpace::Hsv, ColorSpace::Hsl] {
        let mut img = rgba_from_fn(2, 2, |x, y| {
            let v = levels[y * 2 + x];
            [v, v, v, 99]
        });
        Filter::histogram_equalization(&mut img, space).unwrap();
        assert_eq!(img.channels(), 4);
        let values: Vec<u8> = img.data().chunks_exact(4).map(|px| px[0]).collect();
        assert_eq!(values, vec![64, 128, 191, 255], "{space:?}");
        assert!(img.data().chunks_exact(4).all(|px| px[0] == px[1] && px[1] == px[2]));
        assert!(alpha(&img).iter().all(|&a| a == 99));
    }
}

#[test_log::test]
fn threshold_is_strictly_greater_than() {
    let mut above = PixelBuffer::filled(4, 4, 1, 100).unwrap();
    Filter::threshold(&mut above, 99, ColorSpace::Hsv).unwrap();
    assert!(above.data().iter().all(|&v| v == 255));

    let mut at = PixelBuffer::filled(4, 4, 1, 100).unwrap();
    Filter::threshold(&mut at, 100, ColorSpace::Hsv).unwrap();
    assert!(at.data().iter().all(|&v| v == 0));
}

#[test_log::test]
fn thresholding_colour_yields_a_gray_image() {
    let mut img = rgb_from_fn(2, 1, |x, _| if x == 0 { [200, 10, 10] } else { [10, 10, 60] });
    Filter::threshold(&mut img, 100, ColorSpace::Hsv).unwrap();
    assert_eq!(img.channels(), 1);
    assert_eq!(img.data(), &[255, 0]);
}

#[test_log::test]
fn colour_threshold_follows_the_chosen_intensity() {
    let pixels = [[255, 0, 0], [250, 250, 250], [20, 20, 20]];

    // pure red has V = 255 but L = 128
    let mut hsv = rgb_from_fn(3, 1, |x, _| pixels[x]);
    Filter::threshold(&mut hsv, 150, ColorSpace::Hsv).unwrap();
    assert_eq!(hsv.data(), &[255, 255, 0]);

    let mut hsl = rgb_from_fn(3, 1, |x, _| pixels[x]);
    Filter::threshold(&mut hsl, 150, ColorSpace::Hsl).unwrap();
    assert_eq!(hsl.channels(), 1);
    assert_eq!(hsl.data(), &[0, 255, 0]);
}

#[test_log::test]
fn gray_conversion_uses_bt709_weights() {
    let mut img = rgb_from_fn(4, 1, |x, _| match x {
        0 => [255, 255, 255],
        1 => [255, 0, 0],
        2 => [0, 255, 0],
        _ => [0, 0, 255],
    });
    Filter::rgb_to_gray(&mut img).unwrap();
    assert_eq!(img.channels(), 1);
    assert_eq!(img.data(), &[255, 54, 182, 18]);
}

#[test_log::test]
fn gray_conversion_rejects_gray_input() {
    let mut img = noise(3, 3, 1);
    assert!(matches!(
        Filter::rgb_to_gray(&mut img),
        Err(FilterError::UnsupportedChannels(1))
    ));
}

#[test_log::test]
fn kernel_edge_operators_are_silent_on_flat_images() {
    for operator in [EdgeOperator::Sobel, EdgeOperator::Prewitt, EdgeOperator::Scharr] {
        let mut img = PixelBuffer::filled(5, 4, 1, 90).unwrap();
        Filter::edge_detection(&mut img, operator).unwrap();
        assert!(img.data().iter().all(|&v| v == 0), "{operator:?}");
    }
}

#[test_log::test]
fn roberts_on_a_flat_image_only_lights_the_corner() {
    let mut img = PixelBuffer::filled(5, 4, 1, 90).unwrap();
    Filter::edge_detection(&mut img, EdgeOperator::Roberts).unwrap();
    let (corner, rest) = img.data().split_last().unwrap();
    assert_eq!(*corner, 90);
    assert!(rest.iter().all(|&v| v == 0));
}

#[test_log::test]
fn sobel_marks_a_vertical_step() {
    let mut img = gray_from_fn(4, 3, |x, _| if x < 2 { 0 } else { 255 });
    Filter::apply_sobel_edge_detection(&mut img).unwrap();
    for row in img.data().chunks_exact(4) {
        assert_eq!(row, &[0, 255, 255, 0]);
    }
}

#[test_log::test]
fn roberts_uses_its_own_border_formulas() {
    let mut img = gray(2, 2, &[10, 50, 90, 200]);
    Filter::apply_roberts_edge_detection(&mut img).unwrap();
    // interior, last column, last row, corner
    assert_eq!(img.data(), &[194, 212, 40, 200]);
}

#[test_log::test]
fn roberts_needs_two_rows_and_columns() {
    let mut img = gray(3, 1, &[1, 2, 3]);
    assert!(matches!(
        Filter::apply_roberts_edge_detection(&mut img),
        Err(FilterError::ImageTooSmall { width: 3, height: 1 })
    ));
}

#[test_log::test]
fn edge_kernels_need_gray_input_but_the_dispatcher_converts() {
    let mut colour = rgb_from_fn(4, 4, |x, _| [(x * 60) as u8, 0, 0]);
    assert!(matches!(
        Filter::apply_prewitt_edge_detection(&mut colour),
        Err(FilterError::UnsupportedChannels(3))
    ));
    Filter::edge_detection(&mut colour, EdgeOperator::Prewitt).unwrap();
    assert_eq!(colour.channels(), 1);
}
