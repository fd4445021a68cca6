//! CLI command implementations

pub mod blur;
pub mod info;
pub mod sharpen;

use anyhow::{Context, Result};
use hiboost_core::{Domain, PixelBuffer};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    hiboost_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    hiboost_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Applies the input options shared by `sharpen` and `blur`.
///
/// Sources whose samples fall outside their domain's range (float TIFFs
/// with raw measurements) are stretched even without `stretch`.
pub fn prepare_input(image: PixelBuffer, gray: bool, stretch: bool) -> Result<PixelBuffer> {
    let image = if gray { image.to_luma() } else { image };
    let out_of_range = !image.fits_domain();
    if !(stretch || out_of_range) {
        return Ok(image);
    }
    if out_of_range && !stretch {
        warn!(domain = %image.domain(), "samples outside the domain range, stretching input");
    }
    let target = writable_domain(image.domain());
    image
        .stretch_to(target)
        .with_context(|| format!("Failed to stretch input to {target}"))
}

/// Inserts `_<suffix>` between the file stem and the extension.
///
/// `out/img.png` + `k2.5` -> `out/img_k2.5.png`
pub fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    path.with_file_name(name)
}

/// Bounded domain to normalize results into before saving.
///
/// Unbounded buffers are written on the unit scale.
pub fn writable_domain(domain: Domain) -> Domain {
    if domain.is_bounded() { domain } else { Domain::Unit }
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixed_path() {
        assert_eq!(
            suffixed_path(Path::new("out/img.png"), "k2.5"),
            PathBuf::from("out/img_k2.5.png")
        );
        assert_eq!(suffixed_path(Path::new("img"), "mask"), PathBuf::from("img_mask"));
        assert_eq!(
            suffixed_path(Path::new("a.b.tif"), "smoothed"),
            PathBuf::from("a.b_smoothed.tif")
        );
    }

    #[test]
    fn test_writable_domain() {
        assert_eq!(writable_domain(Domain::U16), Domain::U16);
        assert_eq!(writable_domain(Domain::Float), Domain::Unit);
    }

    #[test]
    fn test_prepare_input_stretches_raw_float() {
        let data: Vec<f32> = (0..256).map(|i| i as f32 * 4.0).collect();
        let raw = PixelBuffer::from_data(16, 16, 1, Domain::Unit, data).unwrap();
        let ready = prepare_input(raw, false, false).unwrap();
        assert_eq!(ready.domain(), Domain::Unit);
        assert_eq!(ready.min_max(), Some((0.0, 1.0)));
    }

    #[test]
    fn test_prepare_input_flags() {
        let image = PixelBuffer::from_u8(1, 2, 3, &[50, 50, 50, 150, 150, 150]).unwrap();
        let kept = prepare_input(image.clone(), false, false).unwrap();
        assert_eq!(kept.data(), image.data());

        let stretched = prepare_input(image.clone(), false, true).unwrap();
        assert_eq!(stretched.domain(), Domain::U8);
        assert_eq!(stretched.min_max(), Some((0.0, 255.0)));

        let gray = prepare_input(image, true, true).unwrap();
        assert_eq!(gray.shape(), (1, 2, 1));
        assert_eq!(gray.data(), &[0.0, 255.0]);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
