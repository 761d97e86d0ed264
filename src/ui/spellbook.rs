//! The spellbook: learned abilities on one tab, settings on the other.
//!
//! Opening it is the game's only blocking menu. The page is rebuilt from
//! scratch whenever what it shows changes.

use bevy::prelude::*;

use crate::abilities::{Ability, AbilityRegistry};
use crate::core::{GameState, PlayState};
use crate::player::{Player, PlayerCamera, PlayerStats, DEFAULT_FOV};

pub const SENSITIVITY_STEP: f32 = 0.05;
pub const FOV_STEP: f32 = 5.0;
pub const MIN_FOV: f32 = 60.0;
pub const MAX_FOV: f32 = 110.0;

const PAGE_COLOR: Color = Color::srgb(0.9, 0.85, 0.7);
const INK: Color = Color::srgb(0.0, 0.0, 0.0);
const FADED_INK: Color = Color::srgb(0.5, 0.5, 0.5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpellbookTab {
    #[default]
    Spells,
    System,
}

/// Which tab is open and which learned ability is on the page.
///
/// Survives closing the book, like a bookmark.
#[derive(Resource, Debug, Default)]
pub struct SpellbookView {
    pub tab: SpellbookTab,
    pub page: usize,
}

impl SpellbookView {
    /// Index of the page to show out of `count`, or `None` for an empty book.
    /// A bookmark past the end falls back to the first page.
    pub fn current(&mut self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        if self.page >= count {
            self.page = 0;
        }
        Some(self.page)
    }

    /// Turn to the next page, wrapping around.
    pub fn next(&mut self, count: usize) {
        if count > 0 {
            self.page = (self.page + 1) % count;
        }
    }
}

/// "i/N" page counter.
pub fn page_counter(index: usize, count: usize) -> String {
    format!("{}/{}", index + 1, count)
}

pub fn adjust_fov(fov: f32, delta: f32) -> f32 {
    (fov + delta).clamp(MIN_FOV, MAX_FOV)
}

/// Root of the open spellbook.
#[derive(Component)]
pub struct SpellbookUi;

/// Container for the current tab's contents.
#[derive(Component)]
pub struct SpellbookContent;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellbookButton {
    SpellsTab,
    SystemTab,
    NextSpell,
    SensitivityDown,
    SensitivityUp,
    FovDown,
    FovUp,
    ExitToMenu,
}

/// Setup spellbook systems.
pub fn setup_spellbook_systems(app: &mut App) {
    app.init_resource::<SpellbookView>()
        .add_systems(OnEnter(GameState::InGame), reset_view)
        .add_systems(OnEnter(PlayState::Spellbook), open_spellbook)
        .add_systems(OnExit(PlayState::Spellbook), close_spellbook)
        .add_systems(
            Update,
            (spellbook_input, refresh_spellbook)
                .chain()
                .run_if(in_state(PlayState::Spellbook)),
        );
}

fn reset_view(mut view: ResMut<SpellbookView>) {
    *view = SpellbookView::default();
}

fn open_spellbook(mut commands: Commands, mut view: ResMut<SpellbookView>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            SpellbookUi,
        ))
        .with_children(|parent| {
            // Leather cover
            parent
                .spawn((
                    Node {
                        width: Val::Px(720.0),
                        height: Val::Px(480.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(24.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.4, 0.25, 0.1)),
                ))
                .with_children(|cover| {
                    cover
                        .spawn(Node {
                            flex_direction: FlexDirection::Row,
                            margin: UiRect::bottom(Val::Px(12.0)),
                            ..default()
                        })
                        .with_children(|tabs| {
                            spawn_book_button(tabs, "Spells", SpellbookButton::SpellsTab);
                            spawn_book_button(tabs, "System", SpellbookButton::SystemTab);
                        });

                    cover.spawn((
                        Node {
                            flex_grow: 1.0,
                            flex_direction: FlexDirection::Column,
                            padding: UiRect::all(Val::Px(20.0)),
                            ..default()
                        },
                        BackgroundColor(PAGE_COLOR),
                        SpellbookContent,
                    ));
                });
        });

    // Make sure the first frame draws the page
    view.set_changed();
}

fn close_spellbook(mut commands: Commands, query: Query<Entity, With<SpellbookUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn spawn_book_button(parent: &mut ChildBuilder, text: &str, button: SpellbookButton) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                margin: UiRect::all(Val::Px(4.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.15, 0.15, 0.2)),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

fn spawn_label(parent: &mut ChildBuilder, text: impl Into<String>, size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(10.0)),
            ..default()
        },
    ));
}

/// Handle spellbook button presses.
fn spellbook_input(
    mut interaction_query: Query<
        (&Interaction, &SpellbookButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut view: ResMut<SpellbookView>,
    mut player_query: Query<(&mut PlayerStats, &AbilityRegistry), With<Player>>,
    mut camera_query: Query<&mut Projection, With<PlayerCamera>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = Color::srgb(0.3, 0.3, 0.35).into();
                match button {
                    SpellbookButton::SpellsTab => view.tab = SpellbookTab::Spells,
                    SpellbookButton::SystemTab => view.tab = SpellbookTab::System,
                    SpellbookButton::NextSpell => {
                        if let Ok((_, abilities)) = player_query.get_single() {
                            view.next(abilities.unlocked().len());
                        }
                    }
                    SpellbookButton::SensitivityDown | SpellbookButton::SensitivityUp => {
                        let delta = if *button == SpellbookButton::SensitivityUp {
                            SENSITIVITY_STEP
                        } else {
                            -SENSITIVITY_STEP
                        };
                        if let Ok((mut stats, _)) = player_query.get_single_mut() {
                            stats.adjust_sensitivity(delta);
                        }
                        view.set_changed();
                    }
                    SpellbookButton::FovDown | SpellbookButton::FovUp => {
                        let delta = if *button == SpellbookButton::FovUp {
                            FOV_STEP
                        } else {
                            -FOV_STEP
                        };
                        if let Ok(mut projection) = camera_query.get_single_mut() {
                            if let Projection::Perspective(ref mut perspective) = *projection {
                                let fov = adjust_fov(perspective.fov.to_degrees(), delta);
                                perspective.fov = fov.to_radians();
                            }
                        }
                        view.set_changed();
                    }
                    SpellbookButton::ExitToMenu => {
                        next_state.set(GameState::MainMenu);
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = Color::srgb(0.25, 0.25, 0.3).into();
            }
            Interaction::None => {
                *bg_color = Color::srgb(0.15, 0.15, 0.2).into();
            }
        }
    }
}

/// Redraw the open tab when the view or the settings change.
fn refresh_spellbook(
    mut commands: Commands,
    mut view: ResMut<SpellbookView>,
    content_query: Query<Entity, With<SpellbookContent>>,
    player_query: Query<(&PlayerStats, &AbilityRegistry), With<Player>>,
    camera_query: Query<&Projection, With<PlayerCamera>>,
) {
    if !view.is_changed() {
        return;
    }
    let Ok(content) = content_query.get_single() else {
        return;
    };
    let Ok((stats, abilities)) = player_query.get_single() else {
        return;
    };

    commands.entity(content).despawn_descendants();
    match view.tab {
        SpellbookTab::Spells => {
            let unlocked = abilities.unlocked();
            let page = view.bypass_change_detection().current(unlocked.len());
            commands
                .entity(content)
                .with_children(|parent| draw_spells_tab(parent, &unlocked, page));
        }
        SpellbookTab::System => {
            let fov = match camera_query.get_single() {
                Ok(Projection::Perspective(perspective)) => perspective.fov.to_degrees(),
                _ => DEFAULT_FOV,
            };
            commands
                .entity(content)
                .with_children(|parent| draw_system_tab(parent, stats.mouse_sensitivity, fov));
        }
    }
}

fn draw_spells_tab(parent: &mut ChildBuilder, unlocked: &[&Ability], page: Option<usize>) {
    let Some(index) = page else {
        spawn_label(parent, "Empty...", 40.0, FADED_INK);
        return;
    };
    let ability = unlocked[index];

    spawn_label(parent, ability.name(), 40.0, INK);
    spawn_label(parent, ability.description(), 20.0, Color::srgb(0.2, 0.2, 0.2));
    if unlocked.len() > 1 {
        spawn_book_button(parent, "Next >", SpellbookButton::NextSpell);
    }
    spawn_label(parent, page_counter(index, unlocked.len()), 16.0, INK);
}

fn draw_system_tab(parent: &mut ChildBuilder, sensitivity: f32, fov: f32) {
    spawn_label(parent, format!("Mouse Sens: {:.2}", sensitivity), 20.0, INK);
    parent.spawn(Node::default()).with_children(|row| {
        spawn_book_button(row, "-", SpellbookButton::SensitivityDown);
        spawn_book_button(row, "+", SpellbookButton::SensitivityUp);
    });

    spawn_label(parent, format!("FOV: {:.0}", fov), 20.0, INK);
    parent.spawn(Node::default()).with_children(|row| {
        spawn_book_button(row, "-", SpellbookButton::FovDown);
        spawn_book_button(row, "+", SpellbookButton::FovUp);
    });

    spawn_book_button(parent, "Exit to Menu", SpellbookButton::ExitToMenu);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_book_has_no_page() {
        let mut view = SpellbookView::default();
        assert_eq!(view.current(0), None);
        view.next(0);
        assert_eq!(view.page, 0);
    }

    #[test]
    fn next_wraps_around() {
        let mut view = SpellbookView::default();
        view.next(3);
        view.next(3);
        assert_eq!(view.current(3), Some(2));
        assert_eq!(page_counter(2, 3), "3/3");
        view.next(3);
        assert_eq!(view.current(3), Some(0));
    }

    #[test]
    fn stale_bookmark_falls_back_to_first_page() {
        let mut view = SpellbookView {
            tab: SpellbookTab::Spells,
            page: 4,
        };
        assert_eq!(view.current(2), Some(0));
        assert_eq!(view.page, 0);
    }

    #[test]
    fn fov_is_clamped() {
        assert_eq!(adjust_fov(75.0, FOV_STEP), 80.0);
        assert_eq!(adjust_fov(108.0, FOV_STEP), MAX_FOV);
        assert_eq!(adjust_fov(62.0, -FOV_STEP), MIN_FOV);
    }
}
