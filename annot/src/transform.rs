use crate::{common::*, Corners, ImageSize};

/// Per-axis scale and translation applied to canonical corners.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sx: T,
    pub sy: T,
    pub tx: T,
    pub ty: T,
}

impl<T> Transform<T>
where
    T: Copy + Num,
{
    pub fn identity() -> Self {
        Self {
            sx: T::one(),
            sy: T::one(),
            tx: T::zero(),
            ty: T::zero(),
        }
    }

    pub fn scale(sx: T, sy: T) -> Self {
        Self {
            sx,
            sy,
            tx: T::zero(),
            ty: T::zero(),
        }
    }

    /// Maps fractional coordinates into pixel space of the given image.
    pub fn denormalizing(size: &ImageSize<T>) -> Self {
        Self::scale(size.w(), size.h())
    }

    pub fn from_rects(src: &Corners<T>, tgt: &Corners<T>) -> Self {
        let sx = tgt.w() / src.w();
        let sy = tgt.h() / src.h();
        let tx = tgt.x1() - src.x1() * sx;
        let ty = tgt.y1() - src.y1() * sy;

        Self { sx, sy, tx, ty }
    }
}

impl<T> Transform<T>
where
    T: Copy + Num + Neg<Output = T>,
{
    pub fn inverse(&self) -> Self {
        let sx = T::one() / self.sx;
        let sy = T::one() / self.sy;
        let tx = -self.tx / self.sx;
        let ty = -self.ty / self.sy;

        Self { sx, sy, tx, ty }
    }
}

impl<T> Transform<T> {
    pub fn try_cast<V>(self) -> Option<Transform<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(Transform {
            sx: V::from(self.sx)?,
            sy: V::from(self.sy)?,
            tx: V::from(self.tx)?,
            ty: V::from(self.ty)?,
        })
    }

    pub fn cast<V>(self) -> Transform<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> Mul<&Corners<T>> for &Transform<T>
where
    T: Copy + Num,
{
    type Output = Corners<T>;

    fn mul(self, rhs: &Corners<T>) -> Self::Output {
        rhs.transform(self)
    }
}

impl<T> Mul<&Transform<T>> for &Transform<T>
where
    T: Copy + Num,
{
    type Output = Transform<T>;

    fn mul(self, rhs: &Transform<T>) -> Self::Output {
        Transform {
            sx: self.sx * rhs.sx,
            sy: self.sy * rhs.sy,
            tx: rhs.tx * self.sx + self.tx,
            ty: rhs.ty * self.sy + self.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_inverse() {
        let orig = Transform {
            sx: 2.0,
            sy: 2.0,
            tx: 1.0,
            ty: 1.0,
        };
        assert_eq!(orig.inverse().inverse(), orig);
    }

    #[test]
    fn transform_denormalizing() {
        let transform = Transform::denormalizing(&ImageSize::new(640.0, 480.0));
        let corners = Corners::from_xyxy([0.25, 0.5, 0.5, 1.0]);
        let scaled = &transform * &corners;
        assert_eq!(scaled.xyxy(), [160.0, 240.0, 320.0, 480.0]);
    }

    #[test]
    fn transform_from_rects() {
        let src = Corners::from_xywh([0.0, 0.0, 80.0, 80.0]);
        let tgt = Corners::from_xywh([0.0, 0.0, 40.0, 20.0]);
        let transform = Transform::from_rects(&src, &tgt);
        let expect = Transform {
            sx: 0.5,
            sy: 0.25,
            tx: 0.0,
            ty: 0.0,
        };
        assert_eq!(transform, expect);
    }
}
