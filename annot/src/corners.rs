use crate::{common::*, BaseConvention, Error, Result, Transform};

/// Canonical bounding box: top-left and bottom-right corners.
///
/// Every supported convention converts into this representation and all
/// re-projections are derived from it. Coordinate ordering is trusted from
/// the input: `x1 <= x2` and `y1 <= y2` are not enforced, so negative-extent
/// boxes are representable on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Corners<T> {
    pub(crate) x1: T,
    pub(crate) y1: T,
    pub(crate) x2: T,
    pub(crate) y2: T,
}

impl<T> Corners<T> {
    pub fn try_cast<V>(self) -> Option<Corners<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(Corners {
            x1: V::from(self.x1)?,
            y1: V::from(self.y1)?,
            x2: V::from(self.x2)?,
            y2: V::from(self.y2)?,
        })
    }

    pub fn cast<V>(self) -> Corners<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> Corners<T>
where
    T: Copy,
{
    pub fn x1(&self) -> T {
        self.x1
    }

    pub fn y1(&self) -> T {
        self.y1
    }

    pub fn x2(&self) -> T {
        self.x2
    }

    pub fn y2(&self) -> T {
        self.y2
    }

    /// The canonical tuple.
    pub fn xyxy(&self) -> [T; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Axis-swapped canonical tuple.
    pub fn yxyx(&self) -> [T; 4] {
        [self.y1, self.x1, self.y2, self.x2]
    }
}

impl<T> Corners<T>
where
    T: Copy + Num,
{
    pub fn from_xyxy([x1, y1, x2, y2]: [T; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_yxyx([y1, x1, y2, x2]: [T; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_xywh([x, y, w, h]: [T; 4]) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    pub fn from_yxwh([y, x, w, h]: [T; 4]) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    pub fn from_cxcywh([cx, cy, w, h]: [T; 4]) -> Self {
        let two = T::one() + T::one();
        Self {
            x1: cx - w / two,
            y1: cy - h / two,
            x2: cx + w / two,
            y2: cy + h / two,
        }
    }

    pub fn from_cycxwh([cy, cx, w, h]: [T; 4]) -> Self {
        Self::from_cxcywh([cx, cy, w, h])
    }

    /// The converter registered for a base convention.
    fn converter(base: BaseConvention) -> Option<fn([T; 4]) -> Self> {
        use BaseConvention::*;

        let converter: fn([T; 4]) -> Self = match base {
            Xyxy | Ltrb => Self::from_xyxy,
            Yxyx | Tlbr => Self::from_yxyx,
            Xywh | Ltwh => Self::from_xywh,
            Yxwh | Tlwh => Self::from_yxwh,
            Cxcywh => Self::from_cxcywh,
            Cycxwh => Self::from_cycxwh,
        };
        Some(converter)
    }

    /// Canonicalizes a raw quadruple laid out in the given convention.
    ///
    /// Fails with [`Error::UnsupportedConversion`] when a convention has no
    /// registered converter. The seam exists so that growing the convention
    /// enum without extending the table fails loudly rather than silently
    /// misreading geometry.
    pub fn try_from_convention(base: BaseConvention, quad: [T; 4]) -> Result<Self> {
        let converter = Self::converter(base).ok_or(Error::UnsupportedConversion { base })?;
        Ok(converter(quad))
    }

    pub fn w(&self) -> T {
        self.x2 - self.x1
    }

    pub fn h(&self) -> T {
        self.y2 - self.y1
    }

    pub fn cx(&self) -> T {
        let two = T::one() + T::one();
        self.x1 + self.w() / two
    }

    pub fn cy(&self) -> T {
        let two = T::one() + T::one();
        self.y1 + self.h() / two
    }

    /// Corner-plus-size tuple.
    pub fn xywh(&self) -> [T; 4] {
        [self.x1, self.y1, self.w(), self.h()]
    }

    /// Center-plus-size tuple.
    pub fn cxcywh(&self) -> [T; 4] {
        [self.cx(), self.cy(), self.w(), self.h()]
    }

    /// Re-projects into the target convention.
    ///
    /// Only `xyxy`, `xywh`, `cxcywh` and `yxyx` are supported outputs; every
    /// other target fails with [`Error::UnsupportedProjection`]. Alias names
    /// such as `ltrb` are not accepted even though they share a layout with
    /// a supported target.
    pub fn project(&self, target: BaseConvention) -> Result<[T; 4]> {
        match target {
            BaseConvention::Xyxy => Ok(self.xyxy()),
            BaseConvention::Xywh => Ok(self.xywh()),
            BaseConvention::Cxcywh => Ok(self.cxcywh()),
            BaseConvention::Yxyx => Ok(self.yxyx()),
            _ => Err(Error::UnsupportedProjection { target }),
        }
    }

    pub fn transform(&self, transform: &Transform<T>) -> Self {
        Self {
            x1: self.x1 * transform.sx + transform.tx,
            y1: self.y1 * transform.sy + transform.ty,
            x2: self.x2 * transform.sx + transform.tx,
            y2: self.y2 * transform.sy + transform.ty,
        }
    }
}

impl<T> Index<usize> for Corners<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x1,
            1 => &self.y1,
            2 => &self.x2,
            3 => &self.y2,
            _ => panic!("corner index {} out of range 0..4", index),
        }
    }
}

impl<'a, T> IntoIterator for &'a Corners<T>
where
    T: Copy,
{
    type Item = T;
    type IntoIter = std::array::IntoIter<T, 4>;

    fn into_iter(self) -> Self::IntoIter {
        self.xyxy().into_iter()
    }
}
