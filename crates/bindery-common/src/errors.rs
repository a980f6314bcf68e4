use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(String),

    #[error("failed to encode overrides: {0}")]
    Encode(String),

    #[error("failed to decode overrides: {0}")]
    Decode(String),

    #[error("unsupported override blob version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("path error: {0}")]
    PathError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum IconMapError {
    #[error("duplicate control path '{path}' in icon map for layout '{layout}'")]
    DuplicateControl { layout: String, path: String },

    #[error("icon map parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BinderyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    IconMap(#[from] IconMapError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("rebind.timeout_secs out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: rebind.timeout_secs out of range"
        );
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::Decode("expected value at line 1".into());
        assert_eq!(
            err.to_string(),
            "failed to decode overrides: expected value at line 1"
        );

        let err = StoreError::UnsupportedVersion {
            found: 7,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "unsupported override blob version 7 (expected 1)"
        );
    }

    #[test]
    fn icon_map_error_display() {
        let err = IconMapError::DuplicateControl {
            layout: "Gamepad".into(),
            path: "buttonSouth".into(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate control path 'buttonSouth' in icon map for layout 'Gamepad'"
        );
    }

    #[test]
    fn bindery_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: BinderyError = config_err.into();
        assert!(matches!(err, BinderyError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn bindery_error_from_store() {
        let store_err = StoreError::Io("disk full".into());
        let err: BinderyError = store_err.into();
        assert!(matches!(err, BinderyError::Store(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn bindery_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BinderyError = io_err.into();
        assert!(matches!(err, BinderyError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn bindery_error_other_variants() {
        let err = BinderyError::Catalog("no action maps".into());
        assert_eq!(err.to_string(), "catalog error: no action maps");

        let err = BinderyError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
