use bevy_ecs::prelude::Component;

/// Shows a single bookmarked cell of a sheet instead of an animation.
#[derive(Debug, Clone, Component, PartialEq, Eq)]
pub struct SheetBookmark {
    pub sheet_key: String,
    pub name: String,
}

impl SheetBookmark {
    pub fn new(sheet_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sheet_key: sheet_key.into(),
            name: name.into(),
        }
    }
}
