use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    /// Port the HTTP server binds to
    pub port: u16,
    /// Directory holding the upload and merge HTML pages
    pub static_dir: PathBuf,
    /// Where the merge endpoint writes its combined output file
    pub merged_file_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "api/static".to_string())
                .into(),
            merged_file_path: env::var("MERGED_FILE_PATH")
                .unwrap_or_else(|_| "merged.json".to_string())
                .into(),
        }
    }
}
