//! Crosshair targeting of readable books.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{HoveredBook, PlayerCamera};
use crate::core::GameConfig;
use crate::world::Book;

/// Refresh the hovered book with a ray from the camera.
///
/// Only book colliders are considered, so terrain never hides a book that
/// is within reach.
pub fn update_hovered_book(
    config: Res<GameConfig>,
    rapier_context: Query<&RapierContext>,
    camera_query: Query<&GlobalTransform, With<PlayerCamera>>,
    book_query: Query<(), With<Book>>,
    mut hovered: ResMut<HoveredBook>,
) {
    let target = match (rapier_context.get_single(), camera_query.get_single()) {
        (Ok(context), Ok(camera)) => {
            let is_book = |entity: Entity| book_query.contains(entity);
            context
                .cast_ray(
                    camera.translation(),
                    *camera.forward(),
                    config.player.interact_reach,
                    true,
                    QueryFilter::default().predicate(&is_book),
                )
                .map(|(entity, _)| entity)
        }
        _ => None,
    };

    if hovered.0 != target {
        hovered.0 = target;
    }
}

/// Forget any target when the session starts.
pub fn reset_hovered_book(mut hovered: ResMut<HoveredBook>) {
    hovered.0 = None;
}
