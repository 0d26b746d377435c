use super::*;
use crate::error::Error;
use crate::testing::{
    init_tracing, noisy_step, random_image, square_image, uniform_image, vertical_step, BLACK,
    WHITE,
};

const METHODS: [HysteresisMethod; 3] = [
    HysteresisMethod::FixedPoint,
    HysteresisMethod::ParallelPasses,
    HysteresisMethod::Worklist,
];

fn detector(border_mode: BorderMode) -> EdgeDetector {
    EdgeDetector::from_config(Config {
        border_mode,
        ..Default::default()
    })
}

fn is_edge(edges: &PixelBuffer<u8>, x: usize, y: usize) -> bool {
    edges.pixel(x, y)[0] == EDGE_VALUE
}

fn edge_count(edges: &PixelBuffer<u8>) -> usize {
    let mut count = 0;
    for y in 0..edges.height() {
        for x in 0..edges.width() {
            if is_edge(edges, x, y) {
                count += 1;
            }
        }
    }
    count
}

/// Edge map as text rows, `#` for an edge pixel.
fn edge_rows(edges: &PixelBuffer<u8>) -> Vec<String> {
    (0..edges.height())
        .map(|y| {
            (0..edges.width())
                .map(|x| if is_edge(edges, x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

/// Every value is 0 or 255 and all channels of a pixel agree.
fn assert_binary_replicated(edges: &PixelBuffer<u8>) {
    for y in 0..edges.height() {
        for x in 0..edges.width() {
            let pixel = edges.pixel(x, y);
            assert!(pixel[0] == 0 || pixel[0] == EDGE_VALUE, "({x}, {y})");
            assert!(pixel.iter().all(|&v| v == pixel[0]), "({x}, {y})");
        }
    }
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_black_image_has_no_edges() {
    init_tracing();

    let image = uniform_image(5, 5, BLACK);
    for border in [BorderMode::ZeroHalo, BorderMode::Clamped] {
        let result = detector(border).detect(&image).unwrap();
        assert_eq!(result.edges.dimensions(), image.dimensions());
        assert!(result.edges.data().iter().all(|&v| v == 0), "{border:?}");
        assert_eq!(result.diagnostics.strong_pixels, 0);
        assert_eq!(result.diagnostics.weak_pixels, 0);
        assert_eq!(result.diagnostics.edge_pixels, 0);
    }
}

#[test]
fn test_detect_edges_black_image() {
    let image = uniform_image(5, 5, BLACK);
    let edges = detect_edges(&image, 0.1, 0.3).unwrap();
    assert_eq!(edges.width(), 5);
    assert_eq!(edges.height(), 5);
    assert_eq!(edges.channels(), 3);
    assert!(edges.data().iter().all(|&v| v == 0));
}

#[test]
fn test_step_edge_clamped_is_single_line() {
    let image = vertical_step(10, 10, 5, BLACK, WHITE);
    for hysteresis in METHODS {
        let result = EdgeDetector::from_config(Config {
            border_mode: BorderMode::Clamped,
            hysteresis,
            ..Default::default()
        })
        .detect(&image)
        .unwrap();
        let edges = &result.edges;
        assert_binary_replicated(edges);

        for y in 0..10 {
            for x in 0..10 {
                if !(4..=5).contains(&x) || y == 0 || y == 9 {
                    assert!(
                        !is_edge(edges, x, y),
                        "{hysteresis:?}: unexpected edge at ({x}, {y})"
                    );
                }
            }
        }
        // Columns 4 and 5 carry equal magnitude; at least one survives per row
        for y in 1..9 {
            assert!(
                is_edge(edges, 4, y) || is_edge(edges, 5, y),
                "{hysteresis:?}: row {y} missing boundary edge"
            );
        }
        assert_eq!(result.diagnostics.weak_pixels, 0);
    }
}

#[test]
fn test_step_edge_zero_halo() {
    let image = vertical_step(10, 10, 5, BLACK, WHITE);
    let result = EdgeDetector::new().detect(&image).unwrap();
    let edges = &result.edges;
    assert_binary_replicated(edges);

    // The boundary line runs through every row clear of the zero ring
    for y in 3..=6 {
        assert!(
            is_edge(edges, 4, y) || is_edge(edges, 5, y),
            "row {y} missing boundary edge"
        );
    }
    for i in 0..10 {
        assert!(!is_edge(edges, i, 0) && !is_edge(edges, i, 9));
        assert!(!is_edge(edges, 0, i) && !is_edge(edges, 9, i));
    }
}

#[test]
fn test_step_edge_zero_halo_exact_map() {
    // Besides the boundary line, the forced-zero rings respond next to the
    // white half and where the ramp meets the top and bottom halo.
    let expected = [
        "..........",
        "..##....#.",
        "......#...",
        "....#...#.",
        "....#...#.",
        "....#...#.",
        "....#...#.",
        "......#...",
        "..##....#.",
        "..........",
    ];

    let image = vertical_step(10, 10, 5, BLACK, WHITE);
    for hysteresis in METHODS {
        let result = EdgeDetector::from_config(Config {
            hysteresis,
            ..Default::default()
        })
        .detect(&image)
        .unwrap();
        assert_binary_replicated(&result.edges);
        assert_eq!(edge_rows(&result.edges), expected, "{hysteresis:?}");
        assert_eq!(result.diagnostics.edge_pixels, 16, "{hysteresis:?}");
    }
}

#[test]
fn test_square_edges_stay_near_outline() {
    let image = square_image(24, 24, 8, 16, BLACK, WHITE);
    for border in [BorderMode::ZeroHalo, BorderMode::Clamped] {
        let result = detector(border).detect(&image).unwrap();
        let edges = &result.edges;
        assert_binary_replicated(edges);
        assert!(edge_count(edges) > 0, "{border:?}");

        for y in 0..24 {
            for x in 0..24 {
                if !is_edge(edges, x, y) {
                    continue;
                }
                let near_outline = (5..=18).contains(&x) && (5..=18).contains(&y);
                let deep_inside = (9..=14).contains(&x) && (9..=14).contains(&y);
                assert!(near_outline && !deep_inside, "{border:?}: ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_uniform_color_clamped_has_no_edges() {
    let image = uniform_image(12, 12, [90, 140, 200]);
    let result = detector(BorderMode::Clamped).detect(&image).unwrap();
    assert!(result.edges.data().iter().all(|&v| v == 0));
    assert_eq!(result.diagnostics.edge_pixels, 0);
}

#[test]
fn test_uniform_color_zero_halo_responds_only_at_ring() {
    // The forced-zero Gaussian ring is itself an intensity step, so pixels
    // 1 and 2 away from the border respond while the outermost ring and the
    // interior stay clear.
    for (size, color) in [(12, [90, 140, 200]), (10, WHITE)] {
        let image = uniform_image(size, size, color);
        let result = detector(BorderMode::ZeroHalo).detect(&image).unwrap();
        assert!(edge_count(&result.edges) > 0, "{color:?}");
        for y in 0..size {
            for x in 0..size {
                if is_edge(&result.edges, x, y) {
                    let ring = within_margin(x, y, size, size, 3)
                        && !within_margin(x, y, size, size, 1);
                    assert!(ring, "{color:?}: ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn test_outer_ring_never_an_edge() {
    for seed in 0..4 {
        let image = random_image(17, 13, seed);
        for border in [BorderMode::ZeroHalo, BorderMode::Clamped] {
            let result = detector(border).detect(&image).unwrap();
            assert_binary_replicated(&result.edges);
            for y in 0..13 {
                for x in 0..17 {
                    if within_margin(x, y, 17, 13, 1) {
                        assert!(!is_edge(&result.edges, x, y), "{border:?} ({x}, {y})");
                    }
                }
            }
        }
    }
}

#[test]
fn test_hysteresis_methods_agree_end_to_end() {
    let image = noisy_step(48, 32, 24, 60, 11);
    let results: Vec<_> = METHODS
        .iter()
        .map(|&hysteresis| {
            let config = Config {
                low_threshold: 0.05,
                high_threshold: 0.4,
                hysteresis,
                ..Default::default()
            };
            EdgeDetector::from_config(config).detect(&image).unwrap()
        })
        .collect();

    for result in &results[1..] {
        assert_eq!(result.edges, results[0].edges);
        assert_eq!(
            result.diagnostics.promoted_pixels,
            results[0].diagnostics.promoted_pixels
        );
        assert_eq!(
            result.diagnostics.edge_pixels,
            results[0].diagnostics.edge_pixels
        );
    }
}

#[test]
fn test_diagnostics_consistent_with_edge_map() {
    let image = noisy_step(40, 30, 20, 50, 3);
    let result = EdgeDetector::new().detect(&image).unwrap();
    let diagnostics = result.diagnostics;

    assert_eq!(
        diagnostics.edge_pixels,
        diagnostics.strong_pixels + diagnostics.promoted_pixels
    );
    assert!(diagnostics.promoted_pixels <= diagnostics.weak_pixels);
    assert_eq!(edge_count(&result.edges), diagnostics.edge_pixels);
    assert_eq!(diagnostics.hysteresis_passes, 1);
}

#[test]
fn test_debug_logging_does_not_change_result() {
    let image = noisy_step(24, 16, 12, 40, 7);
    let quiet = EdgeDetector::new().detect(&image).unwrap();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();
    let verbose = tracing::subscriber::with_default(subscriber, || {
        assert!(tracing::enabled!(tracing::Level::DEBUG));
        EdgeDetector::new().detect(&image).unwrap()
    });

    assert_eq!(verbose.edges, quiet.edges);
    assert_eq!(verbose.diagnostics, quiet.diagnostics);
}

#[test]
fn test_full_strength_thresholds_mark_everything() {
    // high = 0 makes every pixel Strong, border included
    let image = uniform_image(6, 6, BLACK);
    let edges = detect_edges(&image, 0.0, 0.0).unwrap();
    assert!(edges.data().iter().all(|&v| v == EDGE_VALUE));
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn test_zero_dimensions_rejected() {
    for (w, h) in [(0, 5), (5, 0)] {
        let image = uniform_image(w, h, BLACK);
        assert!(matches!(
            EdgeDetector::new().detect(&image),
            Err(Error::InvalidDimensions { .. })
        ));
    }
}

#[test]
fn test_wrong_channel_count_rejected() {
    for channels in [1, 4] {
        let image = PixelBuffer::new_filled(8, 8, channels, 0u8);
        assert!(matches!(
            detect_edges(&image, 0.1, 0.3),
            Err(Error::UnsupportedChannelCount { channels: c }) if c == channels
        ));
    }
}

#[test]
fn test_invalid_thresholds_rejected_by_default() {
    let image = vertical_step(10, 10, 5, BLACK, WHITE);
    for (low, high) in [(0.5, 0.2), (-0.1, 0.3), (0.1, 1.5), (f32::NAN, 0.3)] {
        assert!(
            matches!(
                detect_edges(&image, low, high),
                Err(Error::InvalidThreshold { .. })
            ),
            "({low}, {high})"
        );
    }
}

#[test]
fn test_dimension_error_reported_before_thresholds() {
    let image = uniform_image(0, 3, BLACK);
    assert!(matches!(
        detect_edges(&image, 0.9, 0.1),
        Err(Error::InvalidDimensions { .. })
    ));
}

#[test]
fn test_warn_policy_keeps_arithmetic() {
    init_tracing();

    let image = noisy_step(32, 24, 16, 40, 5);
    let inverted = EdgeDetector::from_config(Config {
        low_threshold: 0.5,
        high_threshold: 0.2,
        threshold_policy: ThresholdPolicy::Warn,
        ..Default::default()
    })
    .detect(&image)
    .unwrap();

    // With low > high only the Strong check can fire, exactly as low == high
    let collapsed = EdgeDetector::from_config(Config::with_thresholds(0.2, 0.2))
        .detect(&image)
        .unwrap();

    assert_eq!(inverted.diagnostics.weak_pixels, 0);
    assert_eq!(inverted.diagnostics.promoted_pixels, 0);
    assert_eq!(inverted.edges, collapsed.edges);
}

#[test]
fn test_warn_policy_accepts_out_of_range() {
    let image = vertical_step(10, 10, 5, BLACK, WHITE);
    let result = EdgeDetector::from_config(Config {
        low_threshold: -1.0,
        high_threshold: 10.0,
        threshold_policy: ThresholdPolicy::Warn,
        ..Default::default()
    })
    .detect(&image)
    .unwrap();

    assert_eq!(result.diagnostics.strong_pixels, 0);
    assert!(result.edges.data().iter().all(|&v| v == 0));
}

// ============================================================================
// Batch detection
// ============================================================================

#[test]
fn test_detect_all_independent_results() {
    let images = vec![
        uniform_image(5, 5, BLACK),
        PixelBuffer::new_filled(5, 5, 4, 0u8),
        vertical_step(10, 10, 5, BLACK, WHITE),
    ];
    let detector = detector(BorderMode::Clamped);
    let results = detector.detect_all(&images);

    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().unwrap().edges.data().iter().all(|&v| v == 0));
    assert!(matches!(
        results[1],
        Err(Error::UnsupportedChannelCount { channels: 4 })
    ));

    let single = detector.detect(&images[2]).unwrap();
    assert_eq!(results[2].as_ref().unwrap().edges, single.edges);
}

#[test]
fn test_detector_exposes_config() {
    let config = Config {
        hysteresis: HysteresisMethod::FixedPoint,
        ..Default::default()
    };
    let detector = EdgeDetector::from_config(config);
    assert_eq!(*detector.config(), config);
    assert_eq!(*EdgeDetector::new().config(), Config::default());
}
