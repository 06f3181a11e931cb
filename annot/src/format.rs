use crate::{common::*, Error, Result};

/// One of the recognized coordinate layouts.
///
/// `Xyxy`/`Ltrb` and friends describe the same geometry under different
/// names, but they are distinct tags and re-projection treats them as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseConvention {
    /// Corner pair `x1, y1, x2, y2`.
    Xyxy,
    /// Corner pair, left/top/right/bottom naming.
    Ltrb,
    /// Axis-swapped corner pair `y1, x1, y2, x2`.
    Yxyx,
    /// Axis-swapped corner pair, top/left/bottom/right naming.
    Tlbr,
    /// Corner plus size `x, y, w, h`.
    Xywh,
    /// Corner plus size, left/top naming.
    Ltwh,
    /// Axis-swapped corner plus size `y, x, w, h`.
    Yxwh,
    /// Axis-swapped corner plus size, top/left naming.
    Tlwh,
    /// Center plus size `cx, cy, w, h`.
    Cxcywh,
    /// Axis-swapped center plus size `cy, cx, w, h`.
    Cycxwh,
}

impl BaseConvention {
    pub const ALL: [Self; 10] = [
        Self::Xyxy,
        Self::Ltrb,
        Self::Yxyx,
        Self::Tlbr,
        Self::Xywh,
        Self::Ltwh,
        Self::Yxwh,
        Self::Tlwh,
        Self::Cxcywh,
        Self::Cycxwh,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Xyxy => "xyxy",
            Self::Ltrb => "ltrb",
            Self::Yxyx => "yxyx",
            Self::Tlbr => "tlbr",
            Self::Xywh => "xywh",
            Self::Ltwh => "ltwh",
            Self::Yxwh => "yxwh",
            Self::Tlwh => "tlwh",
            Self::Cxcywh => "cxcywh",
            Self::Cycxwh => "cycxwh",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|convention| convention.name() == name)
    }
}

impl fmt::Display for BaseConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which trailing fields the raw record carries after the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelMode {
    None,
    Class,
    ClassConfidence,
}

/// A parsed annotation format tag.
///
/// The textual grammar is `<base>[n][c|cc]`, e.g. `"cxcywhcc"` or `"xywhn"`.
/// The confidence suffix implies a class field precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxFormat {
    pub base: BaseConvention,
    pub normalized: bool,
    pub labels: LabelMode,
}

impl BoxFormat {
    pub fn new(base: BaseConvention) -> Self {
        Self {
            base,
            normalized: false,
            labels: LabelMode::None,
        }
    }

    /// Decodes a format tag. Suffixes are stripped longest-first, then the
    /// remainder must be a recognized base convention.
    pub fn parse(tag: &str) -> Result<Self> {
        let (rest, labels) = if let Some(rest) = tag.strip_suffix("cc") {
            (rest, LabelMode::ClassConfidence)
        } else if let Some(rest) = tag.strip_suffix('c') {
            (rest, LabelMode::Class)
        } else {
            (tag, LabelMode::None)
        };

        let (rest, normalized) = match rest.strip_suffix('n') {
            Some(rest) => (rest, true),
            None => (rest, false),
        };

        let base = BaseConvention::from_name(rest).ok_or_else(|| Error::UnknownFormat {
            tag: tag.to_owned(),
        })?;

        Ok(Self {
            base,
            normalized,
            labels,
        })
    }

    pub fn has_class(&self) -> bool {
        !matches!(self.labels, LabelMode::None)
    }

    pub fn has_confidence(&self) -> bool {
        matches!(self.labels, LabelMode::ClassConfidence)
    }
}

impl FromStr for BoxFormat {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        Self::parse(tag)
    }
}

impl fmt::Display for BoxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if self.normalized {
            write!(f, "n")?;
        }
        match self.labels {
            LabelMode::None => Ok(()),
            LabelMode::Class => write!(f, "c"),
            LabelMode::ClassConfidence => write!(f, "cc"),
        }
    }
}

impl Serialize for BoxFormat {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoxFormat {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tag_grammar() {
        let format = BoxFormat::parse("cxcywhcc").unwrap();
        assert_eq!(format.base, BaseConvention::Cxcywh);
        assert!(!format.normalized);
        assert_eq!(format.labels, LabelMode::ClassConfidence);
        assert!(format.has_class());
        assert!(format.has_confidence());

        let format = BoxFormat::parse("xywhnc").unwrap();
        assert_eq!(format.base, BaseConvention::Xywh);
        assert!(format.normalized);
        assert_eq!(format.labels, LabelMode::Class);
        assert!(!format.has_confidence());

        let format = BoxFormat::parse("ltrb").unwrap();
        assert_eq!(format.base, BaseConvention::Ltrb);
        assert!(!format.normalized);
        assert_eq!(format.labels, LabelMode::None);
    }

    #[test]
    fn format_tag_rejects_unknown_base() {
        let err = BoxFormat::parse("foobar").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownFormat {
                tag: "foobar".to_owned()
            }
        );

        // Suffix stripping must keep the original tag in the error.
        let err = BoxFormat::parse("abcncc").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownFormat {
                tag: "abcncc".to_owned()
            }
        );
    }

    #[test]
    fn format_tag_display_round_trip() {
        for tag in ["xyxy", "tlbrn", "yxwhc", "cycxwhncc", "ltwhcc"] {
            let format = BoxFormat::parse(tag).unwrap();
            assert_eq!(format.to_string(), tag);
        }
    }

    #[test]
    fn every_base_convention_parses() {
        for convention in BaseConvention::ALL {
            let format = BoxFormat::parse(convention.name()).unwrap();
            assert_eq!(format, BoxFormat::new(convention));
        }
    }
}
