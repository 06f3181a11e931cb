use crate::{coco, common::*, flat, yolo};
use annot::{Annotation, BoxFormat, ClassMap};

/// Image file extensions recognized during discovery.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "ppm", "pgm", "ico",
];

/// Annotation file extensions considered for per-image pairing.
pub const ANNOTATION_EXTENSIONS: &[&str] = &["txt", "json", "csv", "xml"];

/// A folder of images paired with their annotations.
///
/// Every discovered image maps to `None` until an annotation source claims
/// it. A single `.json` file is read as COCO, a single `.csv`/`.txt` as a
/// flat table; otherwise annotation files pair with images by file stem and
/// parse as YOLO-style label files.
#[derive(Debug, Clone)]
pub struct Folder {
    pub image_dir: PathBuf,
    pub format: BoxFormat,
    pub image_annotations: IndexMap<PathBuf, Option<Vec<Annotation<f64>>>>,
    pub class_map: Option<Arc<ClassMap>>,
}

impl Folder {
    pub fn load(
        image_dir: impl AsRef<Path>,
        annotation_path: impl AsRef<Path>,
        format: BoxFormat,
        recursive: bool,
    ) -> Result<Self> {
        let image_dir = image_dir.as_ref();
        let annotation_path = annotation_path.as_ref();

        info!("loading images from '{}'", image_dir.display());
        let image_annotations = discover_images(image_dir, recursive)?;
        info!("found {} images", image_annotations.len());

        let mut folder = Self {
            image_dir: image_dir.to_owned(),
            format,
            image_annotations,
            class_map: None,
        };

        info!("loading annotations from '{}'", annotation_path.display());
        folder.ingest_annotations(annotation_path)?;

        Ok(folder)
    }

    /// Count of images that received at least one annotation.
    pub fn num_annotated(&self) -> usize {
        self.image_annotations
            .values()
            .filter(|annotations| annotations.is_some())
            .count()
    }

    fn ingest_annotations(&mut self, annotation_path: &Path) -> Result<()> {
        let files = if annotation_path.is_file() {
            vec![annotation_path.to_owned()]
        } else {
            list_files(annotation_path)?
        };

        if files.len() == 1 {
            let file = &files[0];
            match extension(file).as_deref() {
                Some("json") => self.ingest_coco(file)?,
                Some("csv") | Some("txt") => self.ingest_flat(file)?,
                _ => warn!("ignoring annotation file '{}'", file.display()),
            }
        } else {
            self.ingest_paired(&files)?;
        }

        Ok(())
    }

    fn ingest_coco(&mut self, file: &Path) -> Result<()> {
        let (by_filename, class_map) = coco::parse_coco_file(file, &self.format)?;
        self.class_map = class_map;

        for (image_path, annotations) in &mut self.image_annotations {
            let file_name = match image_path.file_name().and_then(|name| name.to_str()) {
                Some(file_name) => file_name,
                None => continue,
            };
            match by_filename.get(file_name) {
                Some(parsed) if !parsed.is_empty() => *annotations = Some(parsed.clone()),
                _ => {}
            }
        }

        Ok(())
    }

    fn ingest_flat(&mut self, file: &Path) -> Result<()> {
        for record in flat::parse_flat_file(file)? {
            let image_path = self
                .image_annotations
                .keys()
                .find(|path| {
                    path.file_name().and_then(|name| name.to_str())
                        == Some(record.filename.as_str())
                })
                .cloned();

            let image_path = match image_path {
                Some(image_path) => image_path,
                None => {
                    warn!(
                        "no image named '{}' for row in '{}'",
                        record.filename,
                        file.display()
                    );
                    continue;
                }
            };

            match Annotation::from_raw(&record.to_raw(), &self.format, None) {
                Ok(annotation) => {
                    if let Some(slot) = self.image_annotations.get_mut(&image_path) {
                        slot.get_or_insert_with(Vec::new).push(annotation);
                    }
                }
                Err(err) => {
                    warn!("skipping row for '{}': {}", record.filename, err);
                }
            }
        }

        Ok(())
    }

    fn ingest_paired(&mut self, files: &[PathBuf]) -> Result<()> {
        for file in files {
            if !has_extension(file, ANNOTATION_EXTENSIONS) {
                continue;
            }
            let stem = match file.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => stem,
                None => continue,
            };

            let image_path = self
                .image_annotations
                .keys()
                .find(|path| path.file_stem().and_then(|s| s.to_str()) == Some(stem))
                .cloned();

            if let Some(image_path) = image_path {
                let annotations = yolo::parse_yolo_file(file, &image_path, &self.format)?;
                self.image_annotations
                    .insert(image_path, Some(annotations));
            }
        }

        Ok(())
    }
}

fn discover_images(
    image_dir: &Path,
    recursive: bool,
) -> Result<IndexMap<PathBuf, Option<Vec<Annotation<f64>>>>> {
    let pattern = if recursive {
        image_dir.join("**").join("*")
    } else {
        image_dir.join("*")
    };
    let pattern = pattern.to_str().ok_or_else(|| {
        format_err!(
            "image folder path is not valid UTF-8: '{}'",
            image_dir.display()
        )
    })?;

    let mut images = IndexMap::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        if path.is_file() && has_extension(&path, IMAGE_EXTENSIONS) {
            images.insert(path, None);
        }
    }

    Ok(images)
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read annotation folder '{}'", dir.display()))?
        .map(|entry| -> Result<_> { Ok(entry?.path()) })
        .filter_ok(|path| path.is_file())
        .try_collect()?;

    Ok(files.into_iter().sorted().collect())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    match extension(path) {
        Some(ext) => extensions.iter().any(|candidate| *candidate == ext),
        None => false,
    }
}
