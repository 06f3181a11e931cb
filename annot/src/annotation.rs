use crate::{common::*, BaseConvention, BoxFormat, Corners, Error, Result, Transform};

/// Class label as it appeared in the raw record: numeric id or plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassLabel {
    Id(i64),
    Name(String),
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Maps class labels to display names, e.g. COCO category ids to category
/// names. Carried for rendering only; geometry never consults it.
pub type ClassMap = IndexMap<ClassLabel, String>;

/// One cell of a raw annotation record.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField<T> {
    Num(T),
    Text(String),
}

impl<T> RawField<T> {
    pub fn num(value: T) -> Self {
        Self::Num(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// A single object annotation, canonicalized to corner form.
///
/// Immutable once constructed. Re-projection returns fresh tuples and the
/// value carries no resource handles, so it is safe to share read-only
/// across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<T> {
    corners: Corners<T>,
    class: Option<ClassLabel>,
    confidence: Option<T>,
    class_map: Option<Arc<ClassMap>>,
}

impl<T> Annotation<T>
where
    T: Copy + Num,
{
    pub fn new(corners: Corners<T>) -> Self {
        Self {
            corners,
            class: None,
            confidence: None,
            class_map: None,
        }
    }

    pub fn with_class(self, class: ClassLabel) -> Self {
        Self {
            class: Some(class),
            ..self
        }
    }

    pub fn with_confidence(self, confidence: T) -> Self {
        Self {
            confidence: Some(confidence),
            ..self
        }
    }

    pub fn with_class_map(self, class_map: Arc<ClassMap>) -> Self {
        Self {
            class_map: Some(class_map),
            ..self
        }
    }
}

impl<T> Annotation<T>
where
    T: Copy + Num + ToPrimitive,
{
    /// Builds an annotation from a raw record in the given format.
    ///
    /// The first 4 fields are geometry and are canonicalized through the
    /// conversion table. Field 5, when present, is the class label, stored
    /// as parsed; a numeric class must be an integral id.
    /// Field 6 is the confidence, read only when the format
    /// carries the confidence suffix. Normalized formats are *not* scaled
    /// here; the caller owns image dimensions and applies
    /// [`Transform::denormalizing`] itself.
    pub fn from_raw(
        values: &[RawField<T>],
        format: &BoxFormat,
        class_map: Option<Arc<ClassMap>>,
    ) -> Result<Self> {
        if values.len() < 4 {
            return Err(Error::TruncatedRecord {
                found: values.len(),
            });
        }

        let mut quad = [T::zero(); 4];
        for (index, field) in values[..4].iter().enumerate() {
            quad[index] = match field {
                RawField::Num(value) => *value,
                RawField::Text(_) => return Err(Error::NonNumericField { index }),
            };
        }
        let corners = Corners::try_from_convention(format.base, quad)?;

        let class = match values.get(4) {
            Some(RawField::Num(value)) => {
                // A numeric class cell must be an integral id; 2.5 is a
                // malformed record, not class 2.
                let float = value.to_f64().ok_or(Error::NonNumericField { index: 4 })?;
                if float.fract() != 0.0 {
                    return Err(Error::NonNumericField { index: 4 });
                }
                let id = value.to_i64().ok_or(Error::NonNumericField { index: 4 })?;
                Some(ClassLabel::Id(id))
            }
            Some(RawField::Text(text)) => Some(ClassLabel::Name(text.clone())),
            None => None,
        };

        let confidence = if format.has_confidence() {
            match values.get(5) {
                Some(RawField::Num(value)) => Some(*value),
                Some(RawField::Text(_)) => return Err(Error::NonNumericField { index: 5 }),
                None => None,
            }
        } else {
            None
        };

        Ok(Self {
            corners,
            class,
            confidence,
            class_map,
        })
    }

    /// Re-projects the canonical box into the target convention.
    ///
    /// Class and confidence are untouched; read them from the annotation
    /// directly.
    pub fn to(&self, target: BaseConvention) -> Result<[T; 4]> {
        self.corners.project(target)
    }

    /// Applies a scale/translation, returning a new annotation with the same
    /// class, confidence and class map.
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        Self {
            corners: self.corners.transform(transform),
            class: self.class.clone(),
            confidence: self.confidence,
            class_map: self.class_map.clone(),
        }
    }
}

impl<T> Annotation<T> {
    pub fn corners(&self) -> &Corners<T> {
        &self.corners
    }

    pub fn class(&self) -> Option<&ClassLabel> {
        self.class.as_ref()
    }

    pub fn confidence(&self) -> Option<&T> {
        self.confidence.as_ref()
    }

    pub fn class_map(&self) -> Option<&Arc<ClassMap>> {
        self.class_map.as_ref()
    }

    /// Display name of the class: mapped name when the class map knows the
    /// label, the text itself for named labels, `"class {id}"` otherwise.
    pub fn display_name(&self) -> Option<Cow<'_, str>> {
        let class = self.class.as_ref()?;
        if let Some(map) = &self.class_map {
            if let Some(name) = map.get(class) {
                return Some(Cow::Borrowed(name.as_str()));
            }
        }
        let name = match class {
            ClassLabel::Name(name) => Cow::Borrowed(name.as_str()),
            ClassLabel::Id(id) => Cow::Owned(format!("class {}", id)),
        };
        Some(name)
    }

    /// The annotation doubles as a fixed-length sequence over its canonical
    /// coordinates.
    pub fn len(&self) -> usize {
        4
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<T> Annotation<T>
where
    T: Copy,
{
    /// Canonical coordinates for positional unpacking.
    pub fn coords(&self) -> [T; 4] {
        self.corners.xyxy()
    }
}

impl<T> Index<usize> for Annotation<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.corners[index]
    }
}

impl<'a, T> IntoIterator for &'a Annotation<T>
where
    T: Copy,
{
    type Item = T;
    type IntoIter = std::array::IntoIter<T, 4>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords().into_iter()
    }
}
