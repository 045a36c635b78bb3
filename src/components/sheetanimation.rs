use bevy_ecs::prelude::Component;

/// Per-entity playback state for a sprite-sheet animation.
///
/// Sheet and animation definitions are shared; this component is the only
/// thing that changes while an entity animates. `progress` is in step units
/// (see [`crate::resources::sheetanimation`]).
#[derive(Debug, Clone, Component, PartialEq)]
pub struct SheetAnimation {
    pub sheet_key: String,
    pub animation_key: String,
    pub progress: f32,
    /// Step shown after the last update.
    pub step: usize,
    /// `finished` flag of the last update.
    pub finished: bool,
    /// Tag of the step shown after the last update.
    pub tag: Option<String>,
}

impl SheetAnimation {
    pub fn new(sheet_key: impl Into<String>, animation_key: impl Into<String>) -> Self {
        Self {
            sheet_key: sheet_key.into(),
            animation_key: animation_key.into(),
            progress: 0.0,
            step: 0,
            finished: false,
            tag: None,
        }
    }

    /// Switch to another animation of the same sheet. Playback restarts only
    /// if the key actually changes.
    pub fn play(&mut self, animation_key: &str) {
        if self.animation_key != animation_key {
            self.animation_key = animation_key.to_string();
            self.restart();
        }
    }

    pub fn restart(&mut self) {
        self.progress = 0.0;
        self.step = 0;
        self.finished = false;
        self.tag = None;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_same_key_keeps_progress() {
        let mut anim = SheetAnimation::new("hero", "walk");
        anim.progress = 1.25;
        anim.play("walk");
        assert_eq!(anim.progress, 1.25);
    }

    #[test]
    fn test_play_new_key_restarts() {
        let mut anim = SheetAnimation::new("hero", "walk");
        anim.progress = 1.25;
        anim.finished = true;
        anim.tag = Some("step".into());
        anim.play("attack");
        assert_eq!(anim.animation_key, "attack");
        assert_eq!(anim.progress, 0.0);
        assert!(!anim.finished);
        assert!(!anim.has_tag("step"));
    }
}
