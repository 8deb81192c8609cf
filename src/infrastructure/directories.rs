use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::{DirectoryConfig, FallbackConfig};

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub fallback: FallbackConfig,
}

impl ResolvedPaths {
    /// Fallback documents that are not on disk; loads will come back empty
    /// for these if the API is also unreachable.
    pub fn missing_fallbacks(&self) -> Vec<&Path> {
        [
            self.fallback.dashboard_path.as_path(),
            self.fallback.action_path.as_path(),
        ]
        .into_iter()
        .filter(|path| !path.is_file())
        .collect()
    }
}

pub fn resolve_paths(dirs: &DirectoryConfig, fallback: &FallbackConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&dirs.logs_dir)?;
    Ok(ResolvedPaths {
        logs_dir,
        fallback: FallbackConfig {
            dashboard_path: absolute(&fallback.dashboard_path),
            action_path: absolute(&fallback.action_path),
        },
    })
}

fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {}", path))?;
    }
    Ok(dir.canonicalize().unwrap_or(dir))
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
