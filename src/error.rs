/// Errors produced while building or rendering the scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A caller supplied a value outside the accepted range (tessellation,
    /// radius, height, config values, ...). Raised before any work is done.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("gui error: {0}")]
    Gui(String),
}

impl SceneError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display() {
        let err = SceneError::invalid("sector_count", "must be at least 3, got 2");
        assert_eq!(
            err.to_string(),
            "invalid parameter `sector_count`: must be at least 3, got 2"
        );
    }

    #[test]
    fn config_error_display() {
        let err = SceneError::Config("expected a table".into());
        assert_eq!(err.to_string(), "config error: expected a table");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "scene.toml missing");
        let err: SceneError = io_err.into();
        assert!(matches!(err, SceneError::Io(_)));
        assert!(err.to_string().contains("scene.toml missing"));
    }
}
