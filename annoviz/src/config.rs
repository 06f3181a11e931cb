use crate::common::*;
use annot::BoxFormat;

/// Run configuration, loaded from a JSON5 file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset root; image and annotation paths resolve against it.
    pub root: PathBuf,
    /// Image folder, relative to the root.
    pub image: PathBuf,
    /// Annotation folder or single annotation file, relative to the root.
    pub annotation: PathBuf,
    /// Output folder for rendered images. Nothing is rendered when unset.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Whether the image folder is searched recursively.
    #[serde(default = "default_recursive")]
    pub recursive: bool,
    /// Annotation format tag, e.g. "cxcywhn" or "xywhc".
    #[serde(default = "default_format")]
    pub format: BoxFormat,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.root.join(&self.image)
    }

    pub fn annotation_path(&self) -> PathBuf {
        self.root.join(&self.annotation)
    }

    /// Absolute output paths are honored as-is; relative ones resolve
    /// against the root.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|output| {
            if output.is_absolute() {
                output.clone()
            } else {
                self.root.join(output)
            }
        })
    }
}

fn default_recursive() -> bool {
    true
}

fn default_format() -> BoxFormat {
    "xywhc".parse().unwrap()
}
