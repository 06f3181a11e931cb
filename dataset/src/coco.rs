use crate::common::*;
use annot::{Annotation, BoxFormat, ClassLabel, ClassMap, RawField};

/// Minimal COCO detection schema; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CocoFile {
    #[serde(default)]
    pub images: Vec<CocoImage>,
    #[serde(default)]
    pub annotations: Vec<CocoAnnotation>,
    #[serde(default)]
    pub categories: Vec<CocoCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CocoImage {
    pub id: i64,
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CocoAnnotation {
    pub image_id: i64,
    pub bbox: [f64; 4],
    #[serde(default)]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CocoCategory {
    pub id: i64,
    pub name: String,
}

/// Parses a COCO JSON file into per-file-name annotation lists plus the
/// category map built from `categories`.
///
/// The configured format tag still governs how `bbox` is interpreted; no
/// per-source format override exists.
pub fn parse_coco_file(
    file: &Path,
    format: &BoxFormat,
) -> Result<(HashMap<String, Vec<Annotation<f64>>>, Option<Arc<ClassMap>>)> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read COCO file '{}'", file.display()))?;
    let coco: CocoFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse COCO file '{}'", file.display()))?;

    let class_map = if coco.categories.is_empty() {
        None
    } else {
        let map: ClassMap = coco
            .categories
            .iter()
            .map(|category| (ClassLabel::Id(category.id), category.name.clone()))
            .collect();
        Some(Arc::new(map))
    };

    let id_to_filename: HashMap<i64, &str> = coco
        .images
        .iter()
        .map(|image| (image.id, image.file_name.as_str()))
        .collect();

    let mut by_filename: HashMap<String, Vec<Annotation<f64>>> = HashMap::new();
    for record in &coco.annotations {
        let file_name = match id_to_filename.get(&record.image_id) {
            Some(file_name) => *file_name,
            None => {
                warn!(
                    "annotation references unknown image id {} in '{}'",
                    record.image_id,
                    file.display()
                );
                continue;
            }
        };

        let mut raw: Vec<RawField<f64>> =
            record.bbox.iter().copied().map(RawField::num).collect();
        if let Some(category_id) = record.category_id {
            raw.push(RawField::num(category_id as f64));
        }

        match Annotation::from_raw(&raw, format, class_map.clone()) {
            Ok(annotation) => {
                by_filename
                    .entry(file_name.to_owned())
                    .or_default()
                    .push(annotation);
            }
            Err(err) => warn!("skipping annotation for '{}': {}", file_name, err),
        }
    }

    Ok((by_filename, class_map))
}
