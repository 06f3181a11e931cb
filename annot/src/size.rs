use crate::common::*;

/// Image size in pixels (or any caller-chosen absolute unit).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageSize<T> {
    w: T,
    h: T,
}

impl<T> ImageSize<T> {
    pub fn try_cast<V>(self) -> Option<ImageSize<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(ImageSize {
            w: V::from(self.w)?,
            h: V::from(self.h)?,
        })
    }

    pub fn cast<V>(self) -> ImageSize<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> ImageSize<T>
where
    T: Copy + Num,
{
    /// Extents are expected to be non-negative; this is not checked.
    pub fn new(w: T, h: T) -> Self {
        Self { w, h }
    }

    pub fn w(&self) -> T {
        self.w
    }

    pub fn h(&self) -> T {
        self.h
    }

    pub fn area(&self) -> T {
        self.w * self.h
    }
}
