//! UI plugin - title screen, death screen, HUD and spellbook.

use bevy::prelude::*;

use super::{hud, spellbook};
use crate::core::GameState;

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        spellbook::setup_spellbook_systems(app);

        app.add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_menu_screen)
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup_menu_screen)
            .add_systems(
                Update,
                menu_button_input
                    .run_if(in_state(GameState::MainMenu).or(in_state(GameState::GameOver))),
            );
    }
}

/// Marker for full-screen menu entities, camera included.
#[derive(Component)]
struct MenuScreen;

/// Marker for menu buttons.
#[derive(Component, Clone, Copy)]
enum MenuButton {
    Enter,
    Quit,
    Retry,
    MainMenu,
}

struct ScreenText {
    title: &'static str,
    title_color: Color,
    subtitle: Option<&'static str>,
    background: Color,
}

/// Spawn a centered screen with its own camera; the game camera is gone
/// outside of a session.
fn spawn_menu_screen(commands: &mut Commands, text: ScreenText, buttons: &[(&str, MenuButton)]) {
    commands.spawn((Camera2d, MenuScreen));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(text.background),
            MenuScreen,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(text.title),
                TextFont {
                    font_size: 80.0,
                    ..default()
                },
                TextColor(text.title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            if let Some(subtitle) = text.subtitle {
                parent.spawn((
                    Text::new(subtitle),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.7, 0.7, 0.7)),
                    Node {
                        margin: UiRect::bottom(Val::Px(60.0)),
                        ..default()
                    },
                ));
            }

            for (label, button) in buttons {
                spawn_menu_button(parent, label, *button);
            }
        });
}

fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

fn setup_main_menu(mut commands: Commands) {
    spawn_menu_screen(
        &mut commands,
        ScreenText {
            title: "THE VOID",
            title_color: Color::WHITE,
            subtitle: Some("Start with nothing. Learn to move."),
            background: Color::BLACK,
        },
        &[("Enter", MenuButton::Enter), ("Quit", MenuButton::Quit)],
    );
}

fn setup_game_over(mut commands: Commands) {
    spawn_menu_screen(
        &mut commands,
        ScreenText {
            title: "YOU DIED",
            title_color: Color::srgb(1.0, 0.0, 0.0),
            subtitle: None,
            background: Color::srgba(0.0, 0.0, 0.0, 0.8),
        },
        &[("Retry", MenuButton::Retry), ("Main Menu", MenuButton::MainMenu)],
    );
}

/// Handle presses on title and death screen buttons.
fn menu_button_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        *bg_color = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        }
        .into();

        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            MenuButton::Enter | MenuButton::Retry => {
                info!("Starting a new session");
                next_state.set(GameState::InGame);
            }
            MenuButton::MainMenu => next_state.set(GameState::MainMenu),
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

fn cleanup_menu_screen(mut commands: Commands, query: Query<Entity, With<MenuScreen>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
