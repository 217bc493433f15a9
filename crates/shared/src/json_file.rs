use std::{fs, path::Path};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

use crate::AppError;

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, AppError> {
  let path = path.as_ref();
  let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
  Ok(serde_json::from_str(&raw)?)
}

/// Pretty-print `value` to `path`, creating missing parent directories.
pub fn save_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<(), AppError> {
  let path = path.as_ref();
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  let raw = serde_json::to_string_pretty(value)?;
  fs::write(path, raw).with_context(|| format!("writing {}", path.display()))?;
  Ok(())
}
