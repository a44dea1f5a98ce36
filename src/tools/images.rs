use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use image::{
    imageops::{
        self,
        FilterType,
    },
    DynamicImage,
    GenericImageView,
    Rgba,
    RgbaImage,
    RgbImage,
};

use crate::core::{
    ImageSettings,
    PoemkitError,
};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub output_dir: PathBuf,
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    /// Directory entries that are not supported images.
    pub skipped: usize,
}

/// `art/raw` -> `art/<dir_name>`.
pub fn output_dir_for(source: &Path, dir_name: &str) -> PathBuf {
    match source.parent() {
        Some(parent) => parent.join(dir_name),
        None => PathBuf::from(dir_name),
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Shrinks the image to fit `max_dimension` (never enlarging it) and centers
/// it on a `canvas_size` square of the background color.
pub fn render_canvas(img: &DynamicImage, settings: &ImageSettings) -> RgbImage {
    let size = settings.canvas_size.max(1);
    let bound = settings.max_dimension.clamp(1, size);

    let (width, height) = img.dimensions();
    let fitted = if width > bound || height > bound {
        img.resize(bound, bound, FilterType::Lanczos3)
    } else {
        img.clone()
    };

    let [r, g, b] = settings.background;
    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([r, g, b, 255]));

    let x = (size - fitted.width().min(size)) / 2;
    let y = (size - fitted.height().min(size)) / 2;
    imageops::overlay(&mut canvas, &fitted.to_rgba8(), x as i64, y as i64);

    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

pub fn encode_webp(canvas: &RgbImage, quality: f32) -> Result<Vec<u8>, PoemkitError> {
    let encoder = webp::Encoder::from_rgb(canvas.as_raw(), canvas.width(), canvas.height());
    let memory = encoder
        .encode_simple(false, quality.clamp(0.0, 100.0))
        .map_err(|e| PoemkitError::WebpEncode(format!("{:?}", e)))?;
    Ok(memory.to_vec())
}

pub fn convert_image(
    path: &Path,
    output_dir: &Path,
    settings: &ImageSettings,
) -> Result<PathBuf, PoemkitError> {
    let img = image::open(path)?;
    let canvas = render_canvas(&img, settings);
    let bytes = encode_webp(&canvas, settings.quality)?;

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| PoemkitError::Custom(format!("Invalid file name: {}", path.display())))?;
    let output = output_dir.join(format!("{}.webp", stem));
    fs::write(&output, bytes)?;
    Ok(output)
}

/// Converts every supported image directly inside `source`. A file that fails
/// is logged and counted; the rest of the batch still runs.
pub fn convert_directory(
    source: &Path,
    settings: &ImageSettings,
) -> Result<ConversionSummary, PoemkitError> {
    if !source.is_dir() {
        return Err(PoemkitError::FailedToLoadFile {
            path: source.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let output_dir = output_dir_for(source, &settings.output_dir_name);
    if output_dir == source {
        return Err(PoemkitError::Custom(format!(
            "{} is already the output directory",
            source.display()
        )));
    }
    fs::create_dir_all(&output_dir)?;

    let mut entries: Vec<PathBuf> = fs::read_dir(source)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    let mut summary = ConversionSummary { output_dir: output_dir.clone(), ..Default::default() };

    for path in entries {
        if !is_supported_image(&path) {
            tracing::debug!("Skipping {}", path.display());
            summary.skipped += 1;
            continue;
        }

        match convert_image(&path, &output_dir, settings) {
            Ok(output) => {
                tracing::info!("Converted {} -> {}", path.display(), output.display());
                summary.converted.push(output);
            }
            Err(e) => {
                tracing::error!("Failed to convert {}: {}", path.display(), e);
                summary.failed.push((path, e.to_string()));
            }
        }
    }

    tracing::info!(
        "Converted {} images, {} failed, {} skipped",
        summary.converted.len(),
        summary.failed.len(),
        summary.skipped
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use image::{
        ImageFormat,
        Rgb,
    };

    use super::*;

    fn settings(size: u32) -> ImageSettings {
        ImageSettings {
            max_dimension: size,
            canvas_size: size,
            background: [10, 20, 30],
            quality: 75.0,
            output_dir_name: "poem_images".to_string(),
        }
    }

    #[test]
    fn test_output_dir_is_a_sibling() {
        assert_eq!(
            output_dir_for(Path::new("resource/raw_images"), "poem_images"),
            PathBuf::from("resource/poem_images")
        );
    }

    #[test]
    fn test_output_dir_may_not_be_the_source() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("poem_images");
        fs::create_dir(&source).unwrap();
        assert!(convert_directory(&source, &settings(64)).is_err());
    }

    #[test]
    fn test_wide_image_is_letterboxed() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 100, Rgb([250, 250, 250])));
        let canvas = render_canvas(&img, &settings(60));

        assert_eq!(canvas.dimensions(), (60, 60));
        assert_eq!(canvas.get_pixel(30, 0), &Rgb([10, 20, 30]));
        // resampled, so allow for rounding
        assert!(canvas.get_pixel(30, 30).0.iter().all(|c| *c >= 245));
    }

    #[test]
    fn test_small_image_is_not_enlarged() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([200, 0, 0])));
        let canvas = render_canvas(&img, &settings(40));

        assert_eq!(canvas.dimensions(), (40, 40));
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([10, 20, 30]));
        assert_eq!(canvas.get_pixel(19, 19), &Rgb([200, 0, 0]));
        assert_eq!(canvas.get_pixel(24, 24), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_directory_conversion_outputs_square_webp() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("raw_images");
        fs::create_dir(&source).unwrap();

        RgbImage::from_pixel(300, 100, Rgb([0, 128, 0])).save(source.join("wide.png")).unwrap();
        RgbImage::from_pixel(50, 200, Rgb([0, 0, 128])).save(source.join("tall.png")).unwrap();
        fs::write(source.join("broken.jpg"), b"not an image").unwrap();
        fs::write(source.join("notes.txt"), b"hello").unwrap();

        let summary = convert_directory(&source, &settings(64)).unwrap();

        assert_eq!(summary.output_dir, root.path().join("poem_images"));
        assert_eq!(summary.converted.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.skipped, 1);

        for output in &summary.converted {
            let bytes = fs::read(output).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!(decoded.dimensions(), (64, 64));
        }
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        assert!(convert_directory(&root.path().join("absent"), &settings(64)).is_err());
    }
}
