use crate::common::*;
use annot::{Annotation, BoxFormat, ImageSize, RawField, Transform};

/// Parses one YOLO-style label file paired with its image.
///
/// Rows are whitespace-separated `class x y w h [confidence]`; rows with
/// fewer than 5 fields are skipped. When the format is normalized the
/// geometry is scaled into the image's pixel space before the record is
/// handed over, since the annotation value has no notion of image size.
pub fn parse_yolo_file(
    label_file: &Path,
    image_file: &Path,
    format: &BoxFormat,
) -> Result<Vec<Annotation<f64>>> {
    let denormalize = if format.normalized {
        let size = probe_image_size(image_file)?;
        Some(Transform::denormalizing(&size))
    } else {
        None
    };

    let text = fs::read_to_string(label_file)
        .with_context(|| format!("failed to read label file '{}'", label_file.display()))?;

    let mut annotations = vec![];
    for (line_index, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            continue;
        }

        let geometry: Option<Vec<f64>> = fields[1..5]
            .iter()
            .map(|field| field.parse().ok())
            .collect();
        let geometry = match geometry {
            Some(geometry) => geometry,
            None => {
                warn!(
                    "skipping line {} of '{}': non-numeric geometry",
                    line_index + 1,
                    label_file.display()
                );
                continue;
            }
        };
        let confidence = fields.get(5).and_then(|field| field.parse::<f64>().ok());

        let mut raw: Vec<RawField<f64>> = geometry.into_iter().map(RawField::num).collect();
        if format.has_class() {
            raw.push(RawField::text(fields[0]));
        }
        if format.has_confidence() {
            if let Some(confidence) = confidence {
                raw.push(RawField::num(confidence));
            }
        }

        match Annotation::from_raw(&raw, format, None) {
            Ok(annotation) => {
                let annotation = match &denormalize {
                    Some(transform) => annotation.transform(transform),
                    None => annotation,
                };
                annotations.push(annotation);
            }
            Err(err) => {
                warn!(
                    "skipping line {} of '{}': {}",
                    line_index + 1,
                    label_file.display(),
                    err
                );
            }
        }
    }

    Ok(annotations)
}

/// Reads the pixel dimensions from the image header without decoding it.
pub fn probe_image_size(image_file: &Path) -> Result<ImageSize<f64>> {
    let imagesize::ImageSize { width, height } = imagesize::size(image_file).map_err(|err| {
        format_err!(
            "failed to probe size of image '{}': {}",
            image_file.display(),
            err
        )
    })?;

    Ok(ImageSize::new(width as f64, height as f64))
}
