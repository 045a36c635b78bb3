//! Sprite-sheet systems.
//!
//! - [`sheet_animation`] advances every [`SheetAnimation`] by the frame delta
//!   and writes the resolved cell onto the entity's [`Sprite`].
//! - [`sheet_bookmark`] points a [`Sprite`] at a bookmarked cell whenever the
//!   entity's [`SheetBookmark`] is added or changed, or the [`SheetStore`]
//!   changes.
//!
//! Unknown sheet, animation or bookmark names are logged as errors and the
//! sprite keeps its previous cell. They are never replaced by a default
//! frame.

use bevy_ecs::prelude::*;
use log::error;

use crate::components::sheetanimation::SheetAnimation;
use crate::components::sheetbookmark::SheetBookmark;
use crate::components::sprite::Sprite;
use crate::error::SheetError;
use crate::resources::sheetstore::SheetStore;
use crate::resources::worldtime::WorldTime;

/// Advance one entity's playback and update its sprite.
pub fn step_sheet_animation(
    store: &SheetStore,
    state: &mut SheetAnimation,
    sprite: &mut Sprite,
    delta: f32,
) -> Result<(), SheetError> {
    let sheet = store.get_or_err(&state.sheet_key)?;
    let frame = sheet.animate(&state.animation_key, &mut state.progress, delta)?;
    let rect = sheet.source_rect_for(sprite.image_width, sprite.image_height, frame.grid_index)?;
    state.step = frame.step;
    state.finished = frame.finished;
    state.tag = frame.tag.map(str::to_string);
    sprite.set_source(rect);
    Ok(())
}

/// Advance sheet animations and update the visible sprite cell.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Looks up sheet definitions from [`SheetStore`].
/// - Mutates [`SheetAnimation`] playback state and [`Sprite`] source rect.
pub fn sheet_animation(
    mut query: Query<(Entity, &mut SheetAnimation, &mut Sprite)>,
    store: Res<SheetStore>,
    time: Res<WorldTime>,
) {
    for (entity, mut anim, mut sprite) in query.iter_mut() {
        if let Err(e) = step_sheet_animation(&store, &mut anim, &mut sprite, time.delta) {
            error!("sheet_animation: entity {entity:?}: {e}");
        }
    }
}

/// Apply bookmarked cells to sprites.
///
/// Runs for bookmarks that were added or changed. When the [`SheetStore`]
/// itself changed every bookmark is re-applied, so entities spawned before
/// their sheet was loaded pick it up once it arrives.
pub fn sheet_bookmark(
    mut query: Query<(Entity, Ref<SheetBookmark>, &mut Sprite)>,
    store: Res<SheetStore>,
) {
    let store_changed = store.is_changed();
    for (entity, bookmark, mut sprite) in query.iter_mut() {
        if !store_changed && !bookmark.is_changed() {
            continue;
        }
        let rect = store.get_or_err(&bookmark.sheet_key).and_then(|sheet| {
            sheet.bookmark_rect(sprite.image_width, sprite.image_height, &bookmark.name)
        });
        match rect {
            Ok(rect) => sprite.set_source(rect),
            Err(e) => error!("sheet_bookmark: entity {entity:?}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::sheet::{GridIndex, SheetIndex, SourceRect};
    use crate::resources::sheetanimation::{Animation, AnimationStep};

    fn store() -> SheetStore {
        let blink = Animation::new(
            "blink",
            false,
            vec![
                AnimationStep::new(0.5, GridIndex::new(0, 0)),
                AnimationStep::new(0.5, GridIndex::new(1, 0)).with_tag("closed"),
            ],
        )
        .unwrap();
        let sheet = SheetIndex::new(GridIndex::new(2, 1))
            .unwrap()
            .with_animation(blink)
            .unwrap();
        let mut store = SheetStore::new();
        store.insert("eye", sheet);
        store
    }

    #[test]
    fn test_step_updates_state_and_sprite() {
        let store = store();
        let mut state = SheetAnimation::new("eye", "blink");
        let mut sprite = Sprite::new("eye", 64, 32);

        step_sheet_animation(&store, &mut state, &mut sprite, 0.5).unwrap();
        assert_eq!(state.step, 1);
        assert!(state.has_tag("closed"));
        assert!(!state.finished);
        assert_eq!(
            sprite.source,
            SourceRect {
                x: 32,
                y: 0,
                width: 32,
                height: 32
            }
        );
        assert_eq!(sprite.width, 32.0);

        step_sheet_animation(&store, &mut state, &mut sprite, 0.5).unwrap();
        assert!(state.finished);
        assert_eq!(state.step, 1);
    }

    #[test]
    fn test_bookmark_applied_once_sheet_is_loaded() {
        let mut world = World::new();
        world.insert_resource(SheetStore::new());
        let entity = world
            .spawn((SheetBookmark::new("eye", "shut"), Sprite::new("eye", 64, 32)))
            .id();
        let before = world.get::<Sprite>(entity).unwrap().clone();

        let mut schedule = Schedule::default();
        schedule.add_systems(sheet_bookmark);
        schedule.run(&mut world);
        schedule.run(&mut world);
        assert_eq!(world.get::<Sprite>(entity).unwrap(), &before);

        let sheet = SheetIndex::new(GridIndex::new(2, 1))
            .unwrap()
            .with_bookmark("shut", GridIndex::new(1, 0))
            .unwrap();
        world.resource_mut::<SheetStore>().insert("eye", sheet);
        schedule.run(&mut world);
        assert_eq!(
            world.get::<Sprite>(entity).unwrap().source,
            SourceRect {
                x: 32,
                y: 0,
                width: 32,
                height: 32
            }
        );
    }

    #[test]
    fn test_step_unknown_names_leave_sprite_untouched() {
        let store = store();
        let mut sprite = Sprite::new("eye", 64, 32);
        let before = sprite.clone();

        let mut state = SheetAnimation::new("ear", "blink");
        let err = step_sheet_animation(&store, &mut state, &mut sprite, 0.1).unwrap_err();
        assert_eq!(err, SheetError::SheetNotFound("ear".to_string()));

        let mut state = SheetAnimation::new("eye", "wink");
        let err = step_sheet_animation(&store, &mut state, &mut sprite, 0.1).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(sprite, before);
        assert_eq!(state.progress, 0.0);
    }
}
