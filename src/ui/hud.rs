//! In-game HUD - health, crosshair, read prompt, notifications and damage flash.

use bevy::prelude::*;

use crate::core::{DamageFlash, GameState, GameplaySet, Notify};
use crate::player::{HoveredBook, Player, PlayerStats};

/// How long a notification stays on screen, in seconds.
pub const NOTICE_SECONDS: f32 = 3.0;
/// How long the red damage overlay stays up, in seconds.
pub const FLASH_SECONDS: f32 = 0.2;

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HealthText;

#[derive(Component)]
pub struct InteractPrompt;

#[derive(Component)]
pub struct NotificationText;

#[derive(Component)]
pub struct DamageOverlay;

/// Countdown for a transient overlay. Showing it again restarts the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fade {
    remaining: f32,
}

impl Fade {
    pub fn show(&mut self, seconds: f32) {
        self.remaining = seconds;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn visible(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Timers behind the transient HUD elements.
#[derive(Resource, Default)]
pub struct HudFades {
    pub notice: Fade,
    pub flash: Fade,
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.init_resource::<HudFades>()
        .add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (
                update_health_text,
                update_interact_prompt,
                (show_notifications, show_damage_flash, tick_fades).chain(),
            )
                .in_set(GameplaySet::Feedback),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands, mut fades: ResMut<HudFades>) {
    *fades = HudFades::default();

    // Health (top-left corner)
    commands.spawn((
        Text::new("HP: 100"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.0, 0.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Px(20.0),
            ..default()
        },
        HealthText,
        HudRoot,
    ));

    // Crosshair, prompt and notification share the screen's center column
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(180.0)),
                    ..default()
                },
                Visibility::Hidden,
                NotificationText,
            ));

            // Crosshair dot
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(1.0, 1.0, 0.0)),
            ));

            parent.spawn((
                Text::new("[E] Read"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::top(Val::Px(60.0)),
                    ..default()
                },
                Visibility::Hidden,
                InteractPrompt,
            ));
        });

    // Full-screen damage overlay
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 0.0, 0.0, 0.3)),
        Visibility::Hidden,
        DamageOverlay,
        HudRoot,
    ));
}

fn update_health_text(
    player_query: Query<&PlayerStats, (With<Player>, Changed<PlayerStats>)>,
    mut text_query: Query<&mut Text, With<HealthText>>,
) {
    let Ok(stats) = player_query.get_single() else {
        return;
    };
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    **text = format!("HP: {}", stats.health);
}

fn update_interact_prompt(
    hovered: Res<HoveredBook>,
    mut prompt_query: Query<&mut Visibility, With<InteractPrompt>>,
) {
    if !hovered.is_changed() {
        return;
    }
    let Ok(mut visibility) = prompt_query.get_single_mut() else {
        return;
    };

    *visibility = if hovered.0.is_some() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

/// Show the newest notification, replacing whatever was up.
fn show_notifications(
    mut events: EventReader<Notify>,
    mut fades: ResMut<HudFades>,
    mut text_query: Query<&mut Text, With<NotificationText>>,
) {
    let Some(latest) = events.read().last() else {
        return;
    };
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    **text = latest.0.clone();
    fades.notice.show(NOTICE_SECONDS);
}

fn show_damage_flash(mut events: EventReader<DamageFlash>, mut fades: ResMut<HudFades>) {
    if events.read().count() > 0 {
        fades.flash.show(FLASH_SECONDS);
    }
}

/// Count down the transient elements and sync their visibility.
fn tick_fades(
    time: Res<Time>,
    mut fades: ResMut<HudFades>,
    mut notice_query: Query<&mut Visibility, (With<NotificationText>, Without<DamageOverlay>)>,
    mut flash_query: Query<&mut Visibility, (With<DamageOverlay>, Without<NotificationText>)>,
) {
    let dt = time.delta_secs();
    let notice_visible = fades.notice.visible();
    let flash_visible = fades.flash.visible();
    fades.notice.tick(dt);
    fades.flash.tick(dt);

    if let Ok(mut visibility) = notice_query.get_single_mut() {
        *visibility = if notice_visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Ok(mut visibility) = flash_query.get_single_mut() {
        *visibility = if flash_visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_stays_up_for_three_seconds() {
        let mut fade = Fade::default();
        assert!(!fade.visible());

        fade.show(NOTICE_SECONDS);
        fade.tick(2.9);
        assert!(fade.visible());
        fade.tick(0.2);
        assert!(!fade.visible());
    }

    #[test]
    fn newer_notice_restarts_the_clock() {
        let mut fade = Fade::default();
        fade.show(NOTICE_SECONDS);
        fade.tick(2.5);
        fade.show(NOTICE_SECONDS);
        fade.tick(2.5);
        assert!(fade.visible());
    }

    #[test]
    fn flash_is_brief() {
        let mut fade = Fade::default();
        fade.show(FLASH_SECONDS);
        fade.tick(0.1);
        assert!(fade.visible());
        fade.tick(0.1);
        assert!(!fade.visible());
    }
}
