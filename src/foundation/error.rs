pub type OrreryResult<T> = Result<T, OrreryError>;

#[derive(thiserror::Error, Debug)]
pub enum OrreryError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("canvas error: {0}")]
    Canvas(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OrreryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::Canvas(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            OrreryError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(OrreryError::font("x").to_string().contains("font error:"));
        assert!(
            OrreryError::canvas("x")
                .to_string()
                .contains("canvas error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = OrreryError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
