use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub project_root: PathBuf,
    pub user_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub secrets_path: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        Self::resolve(|key| env::var(key).ok())
    }

    /// Resolves the layout from `DISCOVERY_ROOT` and `DISCOVERY_DATA_DIR`
    /// as reported by `lookup`. Config, secrets and logs live in the data
    /// dir, which defaults to the project root.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_root = lookup("DISCOVERY_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(default_project_root);
        let user_data_dir = lookup("DISCOVERY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| project_root.clone());
        Self::from_dirs(project_root, user_data_dir)
    }

    /// Builds the layout under explicit directories, creating the log dir.
    pub fn from_dirs(project_root: PathBuf, user_data_dir: PathBuf) -> Self {
        let log_dir = user_data_dir.join("logs");
        let secrets_path = user_data_dir.join("secrets.yaml");

        for dir in [&user_data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            project_root,
            user_data_dir,
            log_dir,
            secrets_path,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

/// The crate dir when it holds a `config.yml` (local runs), else the
/// working directory the server was started from.
fn default_project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_dir.join("config.yml").exists() {
        return manifest_dir;
    }

    env::current_dir().unwrap_or(manifest_dir)
}
