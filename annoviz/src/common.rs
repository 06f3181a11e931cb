pub use anyhow::{Context as _, Result};
pub use log::{info, warn};
pub use serde::{Deserialize, Serialize};
pub use std::{
    fs,
    path::{Path, PathBuf},
};
