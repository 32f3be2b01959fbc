use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "pacientes-api";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen port, overridable via `PORT`
pub const DEFAULT_PORT: u16 = 3000;

pub fn port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Get the application data directory.
/// `PACIENTES_DATA_DIR` wins; defaults to ~/PacientesApi/
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PACIENTES_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("PacientesApi")
}

/// Get the directory where uploaded photos are stored
pub fn uploads_dir() -> PathBuf {
    app_data_dir().join("uploads")
}

/// Get the record store path
pub fn db_path() -> PathBuf {
    app_data_dir().join("pacientes.db")
}

pub fn default_log_filter() -> &'static str {
    "info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploads_dir_under_app_data() {
        let uploads = uploads_dir();
        let app = app_data_dir();
        assert!(uploads.starts_with(app));
        assert!(uploads.ends_with("uploads"));
    }

    #[test]
    fn db_path_under_app_data() {
        let db = db_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("pacientes.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
