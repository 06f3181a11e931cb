pub use anyhow::{bail, ensure, format_err, Context as _, Result};
pub use indexmap::IndexMap;
pub use itertools::Itertools as _;
pub use log::{info, warn};
pub use serde::{Deserialize, Serialize};
pub use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
