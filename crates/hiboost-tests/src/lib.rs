//! Integration tests for hiboost crates.
//!
//! End-to-end checks across core, ops and io: decode, filter, encode, and
//! the filtering properties that only show up on full-size images.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use hiboost_core::{Domain, PixelBuffer};
    use hiboost_ops::{
        convolve, convolve_direct, convolve_separable, run, BoundaryMode, Kernel, KernelKind,
        SharpenConfig, SmoothingConfig,
    };
    use tempfile::tempdir;

    fn pattern(h: usize, w: usize, c: usize) -> PixelBuffer {
        let data = (0..h * w * c)
            .map(|i| (((i * 2_654_435_761usize) >> 7) & 0xff) as f32)
            .collect();
        PixelBuffer::from_data(h, w, c, Domain::U8, data).unwrap()
    }

    fn kernels(size: usize) -> Vec<Kernel> {
        vec![
            Kernel::box_filter(size).unwrap(),
            Kernel::gaussian(size, SmoothingConfig::default_sigma(size)).unwrap(),
            Kernel::disk_mean(size).unwrap(),
        ]
    }

    #[test]
    fn test_io_roundtrip_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");
        let image = pattern(32, 24, 4);

        hiboost_io::write(&path, &image).expect("Failed to write PNG");
        let loaded = hiboost_io::read(&path).expect("Failed to read PNG");

        assert_eq!(loaded.shape(), image.shape());
        assert_eq!(loaded.domain(), Domain::U8);
        assert_eq!(loaded.data(), image.data());
    }

    #[test]
    fn test_io_roundtrip_tiff_u16() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.tiff");
        let data: Vec<u16> = (0..16 * 16 * 3).map(|i| (i * 85) as u16).collect();
        let image = PixelBuffer::from_u16(16, 16, 3, &data).unwrap();

        hiboost_io::write(&path, &image).expect("Failed to write TIFF");
        let loaded = hiboost_io::read(&path).expect("Failed to read TIFF");

        assert_eq!(loaded.domain(), Domain::U16);
        assert_eq!(loaded.to_u16(), data);
    }

    #[test]
    fn test_io_roundtrip_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.jpg");
        let image = PixelBuffer::filled(40, 30, 3, Domain::U8, 90.0).unwrap();

        hiboost_io::write(&path, &image).expect("Failed to write JPEG");
        let loaded = hiboost_io::read(&path).expect("Failed to read JPEG");

        assert_eq!(loaded.shape(), (40, 30, 3));
        for &v in loaded.data() {
            assert!((v - 90.0).abs() <= 2.0);
        }
    }

    /// Full pipeline: load -> sharpen -> save -> load
    #[test]
    fn test_sharpen_file_pipeline() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.png");
        let mut image = PixelBuffer::new(5, 5, 1, Domain::U8).unwrap();
        image.set(2, 2, 0, 100.0);
        hiboost_io::write(&input, &image).unwrap();

        let config = SharpenConfig::default()
            .with_smoothing(SmoothingConfig::new(KernelKind::Box, 3))
            .with_gains(vec![1.0, 1.5]);
        let loaded = hiboost_io::read(&input).unwrap();
        let out = run(&loaded, &config).unwrap();

        for boosted in &out.outputs {
            let path = dir.path().join(format!("out_k{}.png", boosted.gain));
            hiboost_io::write(&path, &boosted.image).unwrap();
        }
        let k15 = hiboost_io::read(dir.path().join("out_k1.5.png")).unwrap();
        assert_eq!(k15.get(2, 2, 0), 233.0);
        assert_eq!(k15.get(0, 0, 0), 0.0);

        // 100 + (100 - 11.11)
        let k1 = hiboost_io::read(dir.path().join("out_k1.png")).unwrap();
        assert_eq!(k1.get(2, 2, 0), 189.0);
    }

    #[test]
    fn test_unit_float_source() {
        // 8-bit source sharpened into the unit domain
        let image = pattern(12, 12, 3);
        let config = SharpenConfig::default()
            .with_smoothing(SmoothingConfig::new(KernelKind::Gaussian, 5).with_sigma(1.0))
            .with_gains(vec![2.0])
            .with_output_domain(Domain::Unit);
        let out = run(&image, &config).unwrap();
        let img = &out.outputs[0].image;
        assert_eq!(img.domain(), Domain::Unit);
        assert!(img.data().iter().all(|&v| (0.0..=1.0).contains(&v)));

        let as_u8 = run(&image, &config.clone().with_output_domain(Domain::U8)).unwrap();
        for (u, b) in img.data().iter().zip(as_u8.outputs[0].image.data()) {
            assert!((u * 255.0 - b).abs() <= 0.5 + 1e-3);
        }
    }

    #[test]
    fn test_stretched_float_source_not_saturated() {
        // Raw float samples far outside [0, 1], stretched before filtering
        let (h, w) = (16, 16);
        let data = (0..h * w).map(|i| i as f32 * 4.0).collect();
        let raw = PixelBuffer::from_data(h, w, 1, Domain::Unit, data).unwrap();
        assert!(!raw.fits_domain());
        let image = raw.stretch_to(Domain::Unit).unwrap();
        assert!(image.fits_domain());

        let config = SharpenConfig::default()
            .with_smoothing(SmoothingConfig::new(KernelKind::Box, 5))
            .with_gains(vec![1.5])
            .with_output_domain(Domain::U8);
        let out = run(&image, &config).unwrap();
        let img = &out.outputs[0].image;
        for y in 2..h - 2 {
            for x in 2..w - 2 {
                let expected = (y * w + x) as f32;
                assert_abs_diff_eq!(img.get(y, x, 0), expected, epsilon = 1.0);
            }
        }
        assert!(img.data().iter().any(|&v| v > 0.0 && v < 255.0));
    }

    #[test]
    fn test_shape_preserved_all_sizes() {
        let sides = [1, 2, 17, 256];
        for (h, w) in sides.iter().flat_map(|&h| sides.iter().map(move |&w| (h, w))) {
            let image = pattern(h, w, 1);
            for size in [3, 5, 7] {
                for kernel in kernels(size) {
                    let out = convolve(&image, &kernel, BoundaryMode::Zero).unwrap();
                    assert_eq!(out.shape(), (h, w, 1), "{h}x{w} {} {size}", kernel.kind);
                }
            }
        }
    }

    #[test]
    fn test_interior_sum_preserved() {
        // Constant image: every fully-interior output equals the input
        let image = PixelBuffer::filled(40, 33, 2, Domain::U8, 173.0).unwrap();
        for size in [3, 5, 7] {
            let r = size / 2;
            for kernel in kernels(size) {
                let out = convolve(&image, &kernel, BoundaryMode::Zero).unwrap();
                let mut interior = 0.0f64;
                let mut count = 0usize;
                for y in r..40 - r {
                    for x in r..33 - r {
                        for c in 0..2 {
                            interior += out.get(y, x, c) as f64;
                            count += 1;
                        }
                    }
                }
                assert_abs_diff_eq!(interior / count as f64, 173.0, epsilon = 1e-2);
            }
        }
    }

    /// Kernel mass that falls outside an `h x w` image when centered on `(y, x)`.
    fn outside_mass(kernel: &Kernel, h: usize, w: usize, y: usize, x: usize) -> f64 {
        let (rx, ry) = kernel.radius();
        let mut mass = 0.0f64;
        for ky in 0..kernel.height {
            for kx in 0..kernel.width {
                let sy = (y + ky) as isize - ry as isize;
                let sx = (x + kx) as isize - rx as isize;
                let inside = (0..h as isize).contains(&sy) && (0..w as isize).contains(&sx);
                if !inside {
                    mass += kernel.weight(ky, kx) as f64;
                }
            }
        }
        mass
    }

    #[test]
    fn test_border_darkening_matches_lost_mass() {
        // Zero padding on a constant image: every output sample loses exactly
        // the kernel mass whose taps fall outside the image.
        let (h, w, value) = (20, 23, 255.0f64);
        let image = PixelBuffer::filled(h, w, 1, Domain::U8, value as f32).unwrap();
        for size in [3, 5, 7] {
            for kernel in kernels(size) {
                let out = convolve(&image, &kernel, BoundaryMode::Zero).unwrap();
                let mut expected_lost = 0.0f64;
                for y in 0..h {
                    for x in 0..w {
                        let lost = value * outside_mass(&kernel, h, w, y, x);
                        expected_lost += lost;
                        assert_abs_diff_eq!(
                            out.get(y, x, 0) as f64,
                            value - lost,
                            epsilon = 1e-3
                        );
                    }
                }
                let lost = image.sum() - out.sum();
                assert!(expected_lost > 0.0);
                assert_abs_diff_eq!(lost, expected_lost, epsilon = 1e-4 * expected_lost);
            }
        }
    }

    #[test]
    fn test_border_mass_preserved_with_clamp_and_reflect() {
        let image = PixelBuffer::filled(9, 14, 2, Domain::U8, 255.0).unwrap();
        for mode in [BoundaryMode::Clamp, BoundaryMode::Reflect] {
            for kernel in kernels(5) {
                let out = convolve(&image, &kernel, mode).unwrap();
                assert_abs_diff_eq!(out.sum(), image.sum(), epsilon = 1e-4 * image.sum());
            }
        }
    }

    #[test]
    fn test_separable_matches_direct_large() {
        let image = pattern(64, 48, 3);
        for size in [3, 7] {
            let kernel = Kernel::gaussian(size, 1.3).unwrap();
            let a = convolve_direct(&image, &kernel, BoundaryMode::Reflect).unwrap();
            let b = convolve_separable(&image, &kernel, BoundaryMode::Reflect).unwrap();
            for (x, y) in a.data().iter().zip(b.data()) {
                assert!((x - y).abs() <= 1e-4 * x.abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sharpen.yaml");
        std::fs::write(
            &path,
            "kernel: disk-mean\nsize: 5\ngains: [0.0, 4.5]\nboundary: reflect\n",
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let config: SharpenConfig = serde_yaml::from_str(&text).unwrap();
        let image = PixelBuffer::filled(9, 9, 1, Domain::U8, 255.0).unwrap();
        let out = run(&image, &config).unwrap();

        assert_eq!(out.outputs.len(), 2);
        // reflect padding keeps a constant image constant: mask is zero
        assert!(out.mask.data().iter().all(|&v| v.abs() < 1e-3));
        assert!(out.outputs[1].image.data().iter().all(|&v| v == 255.0));
    }
}
