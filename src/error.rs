//! Error type shared by sheet loading, lookup and playback.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    #[error("missing required key `{key}` in section [{section}]")]
    MissingKey { section: String, key: String },
    #[error("malformed value `{value}` for `{key}` in section [{section}]")]
    MalformedValue {
        section: String,
        key: String,
        value: String,
    },
    #[error("animation `{0}` has no steps")]
    NoSteps(String),
    #[error("animation `{animation}` step {step} has non-positive duration {duration}")]
    NonPositiveDuration {
        animation: String,
        step: usize,
        duration: f32,
    },
    #[error("sprite grid must have at least one column and one row")]
    EmptyGrid,
    #[error("`{name}` references cell ({x},{y}) outside the {cols}x{rows} grid")]
    OutOfGrid {
        name: String,
        x: u32,
        y: u32,
        cols: u32,
        rows: u32,
    },
    #[error("duplicate name `{0}`")]
    DuplicateName(String),
    #[error("failed to load sheet definition: {0}")]
    Load(String),
    #[error("animation `{0}` not found")]
    AnimationNotFound(String),
    #[error("bookmark `{0}` not found")]
    BookmarkNotFound(String),
    #[error("sheet `{0}` not found")]
    SheetNotFound(String),
    #[error("invalid delta time {0}")]
    InvalidDelta(f32),
    #[error("invalid progress {0}")]
    InvalidProgress(f32),
}

impl SheetError {
    /// True for lookups of unregistered animation, bookmark or sheet names.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SheetError::AnimationNotFound(_)
                | SheetError::BookmarkNotFound(_)
                | SheetError::SheetNotFound(_)
        )
    }

    pub(crate) fn malformed(section: &str, key: &str, value: &str) -> Self {
        SheetError::MalformedValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn missing(section: &str, key: &str) -> Self {
        SheetError::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        }
    }
}
