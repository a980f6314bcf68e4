//! Platform directories for configuration, icon maps and persisted overrides.

mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{data_dir, icons_dir, overrides_file};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        let path = data_dir().unwrap();
        assert!(
            path.ends_with("bindery"),
            "data_dir should end with 'bindery', got: {path:?}"
        );
    }

    #[test]
    fn overrides_file_is_inside_data_dir() {
        let file = overrides_file().unwrap();
        assert!(file.starts_with(data_dir().unwrap()));
        assert_eq!(file.file_name().unwrap().to_str().unwrap(), "overrides.json");
    }

    #[test]
    fn icons_dir_is_under_app_config_dir() {
        let dir = icons_dir().unwrap();
        assert!(dir.ends_with("bindery/icons"));
    }
}
