use imgref::{Img, ImgRef, ImgVec};
use rgb::RGBA8;
use swatchcut::{BoxError, PaletteConfig, PaletteError, Region, Scaler, Target};

fn solid(width: usize, height: usize, color: RGBA8) -> ImgVec<RGBA8> {
    Img::new(vec![color; width * height], width, height)
}

fn gradient(width: usize, height: usize) -> ImgVec<RGBA8> {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            pixels.push(RGBA8::new(r, g, 128, 255));
        }
    }
    Img::new(pixels, width, height)
}

/// Nearest-neighbour resampling, enough to exercise the resize path.
struct Nearest;

impl Scaler for Nearest {
    fn scale(
        &self,
        img: ImgRef<'_, RGBA8>,
        width: usize,
        height: usize,
    ) -> Result<ImgVec<RGBA8>, BoxError> {
        let mut out = Vec::with_capacity(width * height);
        for y in 0..height {
            let sy = y * img.height() / height;
            for x in 0..width {
                let sx = x * img.width() / width;
                out.push(img[(sx, sy)]);
            }
        }
        Ok(Img::new(out, width, height))
    }
}

struct Failing;

impl Scaler for Failing {
    fn scale(&self, _: ImgRef<'_, RGBA8>, _: usize, _: usize) -> Result<ImgVec<RGBA8>, BoxError> {
        Err("scaler exploded".into())
    }
}

#[test]
fn smoke_test_gradient() {
    let img = gradient(32, 32);
    let palette = swatchcut::generate(img.as_ref(), &PaletteConfig::default()).unwrap();

    assert_eq!(palette.len(), 16);
    let total: u64 = palette.swatches().iter().map(|s| s.population()).sum();
    assert_eq!(total, 32 * 32);
    assert_eq!(palette.targets().count(), 6);
    for swatch in palette.swatches() {
        assert_eq!(swatch.rgba().a, 255);
    }
}

#[test]
fn solid_color_gives_one_swatch() {
    let color = RGBA8::new(200, 30, 40, 255);
    let img = solid(10, 7, color);
    let palette = swatchcut::generate(img.as_ref(), &PaletteConfig::default()).unwrap();

    assert_eq!(palette.len(), 1);
    let swatch = palette.swatches()[0];
    assert_eq!(swatch.population(), 70);
    assert_eq!(swatch.packed_rgba(), 0xFFC8_1E28);

    // Saturated mid-lightness red: only Vibrant can hold it.
    assert_eq!(palette.vibrant(), Some(&swatch));
    assert!(palette.muted().is_none());
    assert!(palette.light_vibrant().is_none());
    assert!(palette.dark_vibrant().is_none());
    assert!(palette.light_muted().is_none());
    assert!(palette.dark_muted().is_none());
}

#[test]
fn two_color_image() {
    let mut pixels = vec![RGBA8::new(0, 0, 0, 255); 64];
    for px in &mut pixels[32..] {
        *px = RGBA8::new(255, 255, 255, 255);
    }
    let img = Img::new(pixels, 8, 8);
    let palette =
        swatchcut::generate(img.as_ref(), &PaletteConfig::new().max_colors(2)).unwrap();

    let mut colors: Vec<(u32, u64)> = palette
        .swatches()
        .iter()
        .map(|s| (s.packed_rgba(), s.population()))
        .collect();
    colors.sort();
    assert_eq!(colors, vec![(0xFF00_0000, 32), (0xFFFF_FFFF, 32)]);
}

#[test]
fn fully_transparent_gives_empty_palette() {
    let img = solid(8, 8, RGBA8::new(255, 0, 0, 0));
    let palette = swatchcut::generate(img.as_ref(), &PaletteConfig::default()).unwrap();

    assert!(palette.is_empty());
    assert_eq!(palette.targets().count(), 6);
    assert!(palette.targets().all(|t| palette.swatch_for(t).is_none()));
}

#[test]
fn translucent_pixels_respect_threshold() {
    let mut pixels = vec![RGBA8::new(0, 0, 255, 255); 4];
    pixels.extend(vec![RGBA8::new(255, 0, 0, 100); 12]);
    let img = Img::new(pixels, 4, 4);

    let default = swatchcut::generate(img.as_ref(), &PaletteConfig::default()).unwrap();
    assert_eq!(default.len(), 1);
    assert_eq!(default.swatches()[0].packed_rgba(), 0xFF00_00FF);

    let lenient = swatchcut::generate(img.as_ref(), &PaletteConfig::new().alpha_threshold(1)).unwrap();
    assert_eq!(lenient.len(), 2);
}

#[test]
fn region_crops_before_counting() {
    let mut pixels = vec![RGBA8::new(120, 120, 120, 255); 100];
    for y in 2..5 {
        for x in 6..9 {
            pixels[y * 10 + x] = RGBA8::new(20, 40, 220, 255);
        }
    }
    let img = Img::new(pixels, 10, 10);

    let full = swatchcut::generate(img.as_ref(), &PaletteConfig::default()).unwrap();
    assert_eq!(full.len(), 2);

    let config = PaletteConfig::new().region(Region::new(6, 2, 3, 3));
    let cropped = swatchcut::generate(img.as_ref(), &config).unwrap();
    assert_eq!(cropped.len(), 1);
    assert_eq!(cropped.swatches()[0].population(), 9);
    assert_eq!(cropped.vibrant().map(|s| s.packed_rgba()), Some(0xFF14_28DC));
}

#[test]
fn resize_uses_scaler() {
    let img = gradient(64, 32);
    let config = PaletteConfig::new().resize_area(32 * 16).scaler(Nearest);
    let palette = swatchcut::generate(img.as_ref(), &config).unwrap();

    let total: u64 = palette.swatches().iter().map(|s| s.population()).sum();
    assert_eq!(total, 32 * 16);
}

#[test]
fn resize_skipped_for_small_images() {
    let img = gradient(8, 8);
    let config = PaletteConfig::new().resize_area(1_000).scaler(Failing);
    let palette = swatchcut::generate(img.as_ref(), &config).unwrap();
    let total: u64 = palette.swatches().iter().map(|s| s.population()).sum();
    assert_eq!(total, 64);
}

#[test]
fn resize_maps_region() {
    let mut pixels = vec![RGBA8::new(0, 0, 0, 255); 40 * 40];
    for y in 20..40 {
        for x in 20..40 {
            pixels[y * 40 + x] = RGBA8::new(250, 200, 0, 255);
        }
    }
    let img = Img::new(pixels, 40, 40);
    let config = PaletteConfig::new()
        .resize_area(20 * 20)
        .scaler(Nearest)
        .region(Region::new(20, 20, 20, 20));
    let palette = swatchcut::generate(img.as_ref(), &config).unwrap();

    assert_eq!(palette.len(), 1);
    assert_eq!(palette.swatches()[0].population(), 100);
}

#[test]
fn scaler_errors_propagate_unchanged() {
    let img = gradient(16, 16);
    let config = PaletteConfig::new().resize_area(16).scaler(Failing);
    let err = swatchcut::generate(img.as_ref(), &config).unwrap_err();
    assert!(matches!(err, PaletteError::Scale(_)));
    assert_eq!(err.to_string(), "scaler exploded");
}

#[test]
fn error_invalid_max_colors() {
    let img = solid(2, 2, RGBA8::new(0, 0, 0, 255));
    assert!(matches!(
        swatchcut::generate(img.as_ref(), &PaletteConfig::new().max_colors(0)),
        Err(PaletteError::InvalidMaxColors(0))
    ));
}

#[test]
fn error_invalid_region() {
    let img = solid(10, 10, RGBA8::new(0, 0, 0, 255));
    for region in [
        Region::new(0, 0, 0, 5),
        Region::new(0, 0, 5, 0),
        Region::new(8, 0, 3, 3),
        Region::new(0, 9, 1, 2),
        Region::from_bounds(5, 5, 3, 8),
    ] {
        let config = PaletteConfig::new().region(region);
        assert!(
            matches!(
                swatchcut::generate(img.as_ref(), &config),
                Err(PaletteError::InvalidRegion { .. })
            ),
            "{region:?}"
        );
    }
}

#[test]
fn error_missing_scaler() {
    let img = solid(2, 2, RGBA8::new(0, 0, 0, 255));
    assert!(matches!(
        swatchcut::generate(img.as_ref(), &PaletteConfig::new().resize_area(1)),
        Err(PaletteError::MissingScaler { resize_area: 1 })
    ));
}

#[test]
fn custom_target_only() {
    let img = solid(4, 4, RGBA8::new(128, 128, 128, 255));
    let gray = Target::new(
        "Gray",
        swatchcut::Bounds::new(0.0, 0.0, 0.1),
        swatchcut::Bounds::new(0.0, 0.5, 1.0),
        swatchcut::Weights::default(),
    )
    .unwrap();
    let config = PaletteConfig::new().targets(vec![gray.clone()]);
    let palette = swatchcut::generate(img.as_ref(), &config).unwrap();

    assert_eq!(palette.targets().count(), 1);
    assert!(palette.swatch_for(&gray).is_some());
    assert!(palette.muted().is_none());
}

#[test]
fn generate_does_not_mutate_input() {
    let img = gradient(16, 16);
    let before = img.buf().clone();
    let config = PaletteConfig::new().max_colors(4);
    let a = swatchcut::generate(img.as_ref(), &config).unwrap();
    let b = swatchcut::generate(img.as_ref(), &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(img.buf(), &before);
}
