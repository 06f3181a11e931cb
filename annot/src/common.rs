pub use indexmap::IndexMap;
pub use num_traits::{Num, NumCast, ToPrimitive};
pub use serde::{Deserialize, Deserializer, Serialize, Serializer};
pub use std::{
    borrow::Cow,
    fmt,
    ops::{Index, Mul, Neg},
    str::FromStr,
    sync::Arc,
};
