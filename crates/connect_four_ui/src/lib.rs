use bevy::{
    prelude::*,
    tasks::{AsyncComputeTaskPool, Task},
    window::{PresentMode, WindowResolution},
};
use connect_four_core::{Cell, Outcome, Player, COLS, ROWS};
use connect_four_engine::{Analysis, EngineError, GameSession, SearchConfig, WIN_SCORE};
use log::{info, warn};
use rand::Rng;

const CELL_SIZE: f32 = 80.0;
const PIECE_SCALE: f32 = 0.85;
const BOARD_OFFSET_X: f32 = -180.0; // Leaves room on the right for the analysis panel
const AI_DELAY_SECS: f32 = 0.5;

pub struct ConnectFourUiPlugin;

/// Who gets the first move of a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartingPlayer {
    One,
    Two,
    Random,
}

impl StartingPlayer {
    pub fn resolve<R: Rng>(self, rng: &mut R) -> Player {
        match self {
            StartingPlayer::One => Player::One,
            StartingPlayer::Two => Player::Two,
            StartingPlayer::Random => {
                if rng.gen_bool(0.5) {
                    Player::One
                } else {
                    Player::Two
                }
            }
        }
    }
}

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
enum Turn {
    #[default]
    Human,
    Ai,
    GameOver,
}

#[derive(Resource)]
struct GameState {
    session: GameSession,
    ai_thinking_timer: Timer,
    ai_task: Option<Task<Result<usize, EngineError>>>,
    analysis: Option<Analysis>,
    message: Option<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            session: GameSession::new(SearchConfig::from_env()),
            ai_thinking_timer: Timer::from_seconds(AI_DELAY_SECS, TimerMode::Once),
            ai_task: None,
            analysis: None,
            message: None,
        }
    }
}

impl GameState {
    fn turn(&self) -> Turn {
        let state = self.session.state();
        if state.outcome.is_over() {
            Turn::GameOver
        } else if state.current_player.is_computer() {
            Turn::Ai
        } else {
            Turn::Human
        }
    }

    fn new_game(&mut self, starting: StartingPlayer) {
        // Dropping an in-flight task cancels it
        self.ai_task = None;
        self.ai_thinking_timer.reset();
        self.analysis = None;
        self.message = None;
        self.session.reset();
        let first = starting.resolve(&mut rand::thread_rng());
        self.session.set_current_player(first);
    }
}

#[derive(Component)]
struct BoardBackground;

#[derive(Component, Copy, Clone)]
struct Slot {
    row: usize,
    col: usize,
}

#[derive(Component)]
struct StatusText;

#[derive(Component)]
struct AnalysisText;

#[derive(Component)]
struct AiThinkingText;

impl Plugin for ConnectFourUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Connect Four".into(),
                resolution: WindowResolution::new(1000.0, 640.0),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_state::<Turn>()
        .init_resource::<GameState>()
        .add_systems(PreStartup, setup)
        .add_systems(Update, (
            handle_keys,
            handle_input,
            update_ai,
            update_slots,
            update_status_text,
            update_analysis_text,
            update_thinking_text,
        ));
    }
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.1, 0.2, 0.6),
                custom_size: Some(Vec2::new(
                    COLS as f32 * CELL_SIZE + 20.0,
                    ROWS as f32 * CELL_SIZE + 20.0,
                )),
                ..default()
            },
            transform: Transform::from_xyz(BOARD_OFFSET_X, 0.0, 0.0),
            ..default()
        },
        BoardBackground,
    ));

    for row in 0..ROWS {
        for col in 0..COLS {
            commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: cell_color(Cell::Empty),
                        custom_size: Some(Vec2::splat(CELL_SIZE * PIECE_SCALE)),
                        ..default()
                    },
                    transform: Transform::from_translation(slot_to_world(row, col, 1.0)),
                    ..default()
                },
                Slot { row, col },
            ));
        }
    }

    spawn_ui(commands);
}

fn spawn_ui(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 28.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        }),
        StatusText,
    ));

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 18.0,
                color: Color::rgb(0.85, 0.85, 0.85),
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            right: Val::Px(10.0),
            ..default()
        }),
        AnalysisText,
    ));

    commands.spawn((
        TextBundle::from_section(
            "AI is thinking...",
            TextStyle {
                font_size: 24.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        }),
        AiThinkingText,
    ));
}

fn handle_keys(
    keys: Res<Input<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut next_turn: ResMut<NextState<Turn>>,
) {
    let starting = if keys.just_pressed(KeyCode::N) {
        StartingPlayer::One
    } else if keys.just_pressed(KeyCode::T) {
        StartingPlayer::Two
    } else if keys.just_pressed(KeyCode::R) {
        StartingPlayer::Random
    } else {
        return;
    };

    game_state.new_game(starting);
    next_turn.set(game_state.turn());
}

fn handle_input(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mouse_button: Res<Input<MouseButton>>,
    mut game_state: ResMut<GameState>,
    mut next_turn: ResMut<NextState<Turn>>,
    turn: Res<State<Turn>>,
) {
    let left = mouse_button.just_pressed(MouseButton::Left);
    let right = mouse_button.just_pressed(MouseButton::Right);
    if !left && !right {
        return;
    }

    let window = windows.single();
    let (camera, camera_transform) = camera_q.single();
    let Some(world_position) = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor))
        .map(|ray| ray.origin.truncate())
    else {
        return;
    };
    let Some(column) = world_to_column(world_position) else {
        return;
    };

    if right {
        // Analysis is read-only, so it is allowed on either side's turn
        game_state.analysis = game_state.session.analyze_move(column);
        if game_state.analysis.is_none() {
            game_state.message = Some(format!("Nothing to analyze in column {}", column));
        }
        return;
    }

    if *turn.get() != Turn::Human {
        return;
    }

    match game_state.session.apply_move(column) {
        Ok(_) => {
            game_state.analysis = None;
            game_state.message = None;
            next_turn.set(game_state.turn());
        }
        Err(e) => {
            warn!("Move rejected: {}", e);
            game_state.message = Some(e.to_string());
        }
    }
}

fn update_ai(
    time: Res<Time>,
    mut game_state: ResMut<GameState>,
    mut next_turn: ResMut<NextState<Turn>>,
    turn: Res<State<Turn>>,
) {
    if *turn.get() != Turn::Ai {
        return;
    }

    game_state.ai_thinking_timer.tick(time.delta());

    if game_state.ai_task.is_none() && game_state.ai_thinking_timer.finished() {
        let session = game_state.session.clone();
        let thread_pool = AsyncComputeTaskPool::get();
        game_state.ai_task = Some(thread_pool.spawn(async move { session.compute_ai_move() }));
    }

    if let Some(mut task) = game_state.ai_task.take() {
        if let Some(result) = futures_lite::future::block_on(futures_lite::future::poll_once(&mut task)) {
            let applied = result.and_then(|column| {
                game_state.session.apply_move(column).map_err(EngineError::from)
            });
            match applied {
                Ok(state) => {
                    info!("AI move applied, outcome {:?}", state.outcome);
                    game_state.analysis = None;
                }
                Err(e) => {
                    warn!("AI move failed: {}", e);
                    game_state.message = Some(e.to_string());
                }
            }
            game_state.ai_thinking_timer.reset();
            next_turn.set(game_state.turn());
        } else {
            game_state.ai_task = Some(task);
        }
    }
}

fn update_slots(game_state: Res<GameState>, mut slots: Query<(&Slot, &mut Sprite)>) {
    if !game_state.is_changed() {
        return;
    }
    let board = game_state.session.state().board;
    for (slot, mut sprite) in slots.iter_mut() {
        sprite.color = cell_color(board.get(slot.row, slot.col));
    }
}

fn update_status_text(
    game_state: Res<GameState>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    if let Ok(mut text) = text_query.get_single_mut() {
        let state = game_state.session.state();
        let mut status = describe_outcome(state.outcome, state.current_player);
        if let Some(message) = &game_state.message {
            status.push_str(&format!("  ({})", message));
        }
        text.sections[0].value = status;
    }
}

fn update_analysis_text(
    game_state: Res<GameState>,
    mut text_query: Query<&mut Text, With<AnalysisText>>,
) {
    if let Ok(mut text) = text_query.get_single_mut() {
        text.sections[0].value = match &game_state.analysis {
            Some(analysis) => format_analysis(analysis),
            None => "Right-click a column to analyze it\nN / T / R: new game (you / AI / random first)".to_string(),
        };
    }
}

fn update_thinking_text(
    turn: Res<State<Turn>>,
    mut text_query: Query<&mut Visibility, With<AiThinkingText>>,
) {
    if let Ok(mut visibility) = text_query.get_single_mut() {
        *visibility = if *turn.get() == Turn::Ai {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

fn cell_color(cell: Cell) -> Color {
    match cell {
        Cell::Empty => Color::rgb(0.9, 0.9, 0.9),
        Cell::One => Color::rgb(0.85, 0.15, 0.15),
        Cell::Two => Color::rgb(0.95, 0.8, 0.1),
    }
}

fn slot_to_world(row: usize, col: usize, z: f32) -> Vec3 {
    Vec3::new(
        BOARD_OFFSET_X + (col as f32 - (COLS as f32 - 1.0) / 2.0) * CELL_SIZE,
        ((ROWS as f32 - 1.0) / 2.0 - row as f32) * CELL_SIZE,
        z,
    )
}

fn world_to_column(world: Vec2) -> Option<usize> {
    let half_height = ROWS as f32 * CELL_SIZE / 2.0;
    if world.y.abs() > half_height {
        return None;
    }
    let col = ((world.x - BOARD_OFFSET_X) / CELL_SIZE + COLS as f32 / 2.0).floor();
    if col >= 0.0 && col < COLS as f32 {
        Some(col as usize)
    } else {
        None
    }
}

fn describe_outcome(outcome: Outcome, current: Player) -> String {
    match outcome {
        Outcome::InProgress => format!("{} to move", current.name()),
        Outcome::Won(winner) => format!("{} wins!", winner.name()),
        Outcome::Draw => "Draw".to_string(),
    }
}

fn describe_score(score: i64) -> String {
    if score >= WIN_SCORE {
        "forced win".to_string()
    } else if score <= -WIN_SCORE {
        "forced loss".to_string()
    } else {
        format!("{:+}", score)
    }
}

fn format_analysis(analysis: &Analysis) -> String {
    let mut lines = vec![format!(
        "{} in column {}: {}",
        analysis.player.name(),
        analysis.column,
        describe_score(analysis.score)
    )];
    let mut mover = analysis.player;
    for step in &analysis.steps {
        lines.push(format!(
            "  {} -> column {} ({})",
            mover.name(),
            step.column,
            describe_score(step.score)
        ));
        mover = mover.other();
    }
    if let Some(last) = analysis.steps.last() {
        lines.push(String::new());
        lines.push(last.board.to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_four_core::Game;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_fixed_starting_players() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(StartingPlayer::One.resolve(&mut rng), Player::One);
        assert_eq!(StartingPlayer::Two.resolve(&mut rng), Player::Two);
    }

    #[test]
    fn test_random_starting_player_covers_both() {
        let mut rng = StdRng::seed_from_u64(9);
        let picks: Vec<Player> = (0..64).map(|_| StartingPlayer::Random.resolve(&mut rng)).collect();
        assert!(picks.contains(&Player::One));
        assert!(picks.contains(&Player::Two));
    }

    #[test]
    fn test_slot_and_column_mapping_agree() {
        for row in 0..ROWS {
            for col in 0..COLS {
                let world = slot_to_world(row, col, 0.0).truncate();
                assert_eq!(world_to_column(world), Some(col));
            }
        }
        assert_eq!(world_to_column(Vec2::new(BOARD_OFFSET_X + 1000.0, 0.0)), None);
        assert_eq!(world_to_column(Vec2::new(BOARD_OFFSET_X, 1000.0)), None);
    }

    #[test]
    fn test_describe_score() {
        assert_eq!(describe_score(WIN_SCORE), "forced win");
        assert_eq!(describe_score(-WIN_SCORE), "forced loss");
        assert_eq!(describe_score(6), "+6");
        assert_eq!(describe_score(-4), "-4");
    }

    #[test]
    fn test_format_analysis_lists_every_step() {
        let game = Game::new();
        let analysis = connect_four_engine::analyze_move(&game, 3, 3).unwrap();
        let text = format_analysis(&analysis);
        assert!(text.starts_with("Player One in column 3: -6"));
        assert_eq!(text.matches(" -> column ").count(), analysis.steps.len());
    }

    #[test]
    fn test_describe_outcome() {
        assert_eq!(describe_outcome(Outcome::InProgress, Player::Two), "Player Two to move");
        assert_eq!(describe_outcome(Outcome::Won(Player::One), Player::One), "Player One wins!");
        assert_eq!(describe_outcome(Outcome::Draw, Player::One), "Draw");
    }
}
