use crate::common::*;
use annot::{Annotation, BaseConvention, ClassLabel};
use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

const LINE_WIDTH: i32 = 2;

const PALETTE: [[u8; 3]; 6] = [
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [0, 255, 255],
    [255, 0, 255],
    [255, 255, 0],
];

fn class_color(annotation: &Annotation<f64>) -> Rgb<u8> {
    let index = match annotation.class() {
        Some(ClassLabel::Id(id)) => id.rem_euclid(PALETTE.len() as i64) as usize,
        Some(ClassLabel::Name(name)) => {
            name.bytes().map(usize::from).sum::<usize>() % PALETTE.len()
        }
        None => 0,
    };
    Rgb(PALETTE[index])
}

/// Renders hollow rectangles for every annotation onto the image and writes
/// the result to `output_path`, creating parent folders as needed.
pub fn annotate_image(
    image_path: &Path,
    annotations: &[Annotation<f64>],
    output_path: &Path,
) -> Result<()> {
    let mut image = image::open(image_path)
        .with_context(|| format!("failed to open image '{}'", image_path.display()))?
        .to_rgb8();

    for annotation in annotations {
        let corners = annotation.to(BaseConvention::Xyxy)?;
        let color = class_color(annotation);
        draw_box(&mut image, corners, color);
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    image
        .save(output_path)
        .with_context(|| format!("failed to write '{}'", output_path.display()))?;

    Ok(())
}

/// Drawing-only clamping: the rectangle is ordered and clipped to the image
/// so the renderer never sees a degenerate rect. Stored geometry stays
/// untouched.
fn draw_box(image: &mut RgbImage, [x1, y1, x2, y2]: [f64; 4], color: Rgb<u8>) {
    let (width, height) = image.dimensions();

    let x1 = x1.round() as i32;
    let y1 = y1.round() as i32;
    let x2 = x2.round() as i32;
    let y2 = y2.round() as i32;

    let x_min = x1.min(x2).clamp(0, width as i32);
    let y_min = y1.min(y2).clamp(0, height as i32);
    let x_max = x1.max(x2).clamp(0, width as i32);
    let y_max = y1.max(y2).clamp(0, height as i32);
    let w = (x_max - x_min).max(1) as u32;
    let h = (y_max - y_min).max(1) as u32;

    for inset in 0..LINE_WIDTH {
        let w = w.saturating_sub(2 * inset as u32).max(1);
        let h = h.saturating_sub(2 * inset as u32).max(1);
        let rect = Rect::at(x_min + inset, y_min + inset).of_size(w, h);
        draw_hollow_rect_mut(image, rect, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annot::Corners;

    #[test]
    fn annotate_image_draws_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.png");
        let output = dir.path().join("out").join("input.png");

        RgbImage::new(32, 32).save(&input).unwrap();

        let annotation = Annotation::new(Corners::from_xyxy([4.0, 4.0, 20.0, 20.0]))
            .with_class(ClassLabel::Id(0));
        annotate_image(&input, &[annotation], &output).unwrap();

        let rendered = image::open(&output).unwrap().to_rgb8();
        assert_eq!(*rendered.get_pixel(4, 4), Rgb(PALETTE[0]));
        // The hollow rect spans [x_min, x_min + w - 1].
        assert_eq!(*rendered.get_pixel(19, 10), Rgb(PALETTE[0]));
        // Pixels well inside the box stay black.
        assert_eq!(*rendered.get_pixel(12, 12), Rgb([0, 0, 0]));
    }

    #[test]
    fn annotate_image_tolerates_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.png");
        let output = dir.path().join("input_out.png");

        RgbImage::new(8, 8).save(&input).unwrap();
        annotate_image(&input, &[], &output).unwrap();
        assert!(output.exists());
    }
}
