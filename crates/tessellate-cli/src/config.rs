//! Runtime settings resolved from the environment
//!
//! Command-line flags override whatever is detected here.

use std::path::{Path, PathBuf};
use tessellate_core::{CatalogVariant, SearchBudget};

/// Where the binary is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development - verbose defaults
    Development,
    /// Batch runs - warnings suppressed unless asked for
    Production,
}

impl Environment {
    /// Detect environment from TESSELLATE_ENV variable
    pub fn detect() -> Self {
        Self::parse(std::env::var("TESSELLATE_ENV").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// Default log filter when RUST_LOG is unset.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "warn",
            Environment::Production => "error",
        }
    }
}

/// Directory layout for task files and predictions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Layout {
    /// Competition layout when running inside a Kaggle kernel, local
    /// `./input` and `./submission` otherwise.
    pub fn detect() -> Self {
        Self::for_kernel(std::env::var_os("KAGGLE_KERNEL_RUN_TYPE").is_some())
    }

    fn for_kernel(in_kernel: bool) -> Self {
        if in_kernel {
            Self {
                data_dir: PathBuf::from("../input/abstraction-and-reasoning-challenge/"),
                output_dir: PathBuf::from("./"),
            }
        } else {
            Self {
                data_dir: PathBuf::from("./input"),
                output_dir: PathBuf::from("./submission"),
            }
        }
    }

    /// Resolve a task argument. Existing paths are taken as given, anything
    /// else is looked up under the data directory.
    pub fn resolve_task(&self, arg: &Path) -> PathBuf {
        if arg.exists() || arg.is_absolute() {
            arg.to_path_buf()
        } else {
            self.data_dir.join(arg)
        }
    }
}

/// Everything a command needs to run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub layout: Layout,
    pub catalog: CatalogVariant,
    pub budget: SearchBudget,
    /// Solution cache file; `None` disables persistence
    pub cache_file: Option<PathBuf>,
}

impl Settings {
    pub fn detect() -> Self {
        Self {
            environment: Environment::detect(),
            layout: Layout::detect(),
            catalog: CatalogVariant::default(),
            budget: SearchBudget::unlimited(),
            cache_file: default_cache_file(),
        }
    }
}

/// `<cache dir>/tessellate/solutions.json`
pub fn default_cache_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("tessellate").join("solutions.json"))
}
