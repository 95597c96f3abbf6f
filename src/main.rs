//! TILEHOP: a small tile-based platformer
//!
//! Run, jump and shoot through a JSON tile map. The game draws into a
//! 320x240 render target that is scaled up to the window:
//! - Axis-separated tile collision
//! - Spawner markers placing the player and enemies
//! - Smoothed scrolling camera with parallax clouds

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod config;
mod game;
mod input;
mod world;

use macroquad::camera::{set_camera, set_default_camera, Camera2D};
use macroquad::color::BLACK;
use macroquad::file::load_string;
use macroquad::math::{vec2, Rect as ViewRect};
use macroquad::texture::{draw_texture_ex, render_target, DrawTextureParams, FilterMode};
use macroquad::window::{clear_background, next_frame, screen_height, screen_width, Conf};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{error, info};

use assets::{AssetError, Assets};
use config::{ConfigError, GameConfig};
use game::{draw_hud, draw_world, ClipTable, Clouds, FrameClock, Scoreboard, ScreenCanvas, World};
use input::{Command, Controls};
use world::{LevelError, Tilemap};

/// Anything that stops the game from starting
#[derive(Debug, Error)]
enum StartupError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("assets: {0}")]
    Asset(#[from] AssetError),
    #[error("failed to read level {path}: {source}")]
    LevelFile {
        path: String,
        #[source]
        source: macroquad::Error,
    },
    #[error("level: {0}")]
    Level(#[from] LevelError),
}

/// Config file from the first CLI argument, or the default location
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> Result<GameConfig, ConfigError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    GameConfig::load_or_default(path)
}

/// No filesystem on WASM, always defaults
#[cfg(target_arch = "wasm32")]
fn load_config() -> Result<GameConfig, ConfigError> {
    Ok(GameConfig::default())
}

fn window_conf() -> Conf {
    // Errors are reported again once logging is up
    let window = load_config().unwrap_or_default().window;
    Conf {
        window_title: format!("{} v{}", window.title, VERSION),
        window_width: window.width,
        window_height: window.height,
        window_resizable: true,
        ..Default::default()
    }
}

async fn load_level(path: &str) -> Result<Tilemap, StartupError> {
    let text = load_string(path)
        .await
        .map_err(|source| StartupError::LevelFile {
            path: path.to_string(),
            source,
        })?;
    Ok(Tilemap::from_json_str(&text)?)
}

async fn start() -> Result<(GameConfig, Assets, World), StartupError> {
    let config = load_config()?;
    let assets = Assets::load().await?;

    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    let mut rng = StdRng::seed_from_u64(seed);
    let clouds = Clouds::new(&mut rng, assets.cloud_count(), config.clouds);

    let mut world = World::new(
        &config,
        assets.clip_table("player", ClipTable::player()),
        assets.clip_table("enemy", ClipTable::enemy()),
        clouds,
    );
    world.load_level(load_level(&config.level).await?)?;
    info!(level = %config.level, "game started");

    Ok((config, assets, world))
}

fn apply(world: &mut World, command: Command) {
    match command {
        Command::Jump => {
            world.jump();
        }
        Command::Shoot => world.shoot(),
        Command::SetShooting(shooting) => world.set_shooting(shooting),
        Command::Fire => {
            world.fire();
        }
        Command::Quit => {}
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    // Initialize logging (fmt needs a system clock, unavailable on WASM)
    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (config, assets, mut world) = match start().await {
        Ok(started) => started,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let display = config.display.size();
    let target = render_target(display.x as u32, display.y as u32);
    target.texture.set_filter(FilterMode::Nearest);
    let mut camera = Camera2D::from_display_rect(ViewRect::new(0.0, 0.0, display.x, display.y));
    camera.render_target = Some(target.clone());

    let mut controls = Controls::new(config.shoot_mode);
    let mut clock = FrameClock::new(config.frame_time());
    let mut score = Scoreboard::new();

    loop {
        clock.begin();

        let commands = controls.poll();
        if commands.contains(&Command::Quit) {
            info!(kills = score.kills, shots = score.shots, falls = score.falls, "quit");
            return;
        }
        for command in commands {
            apply(&mut world, command);
        }

        world.tick(controls.intent());
        score.record(&mut world.events);

        set_camera(&camera);
        clear_background(BLACK);
        draw_world(&mut ScreenCanvas, &world, &assets, display);
        draw_hud(&mut ScreenCanvas, &score);

        set_default_camera();
        clear_background(BLACK);
        draw_texture_ex(
            &target.texture,
            0.0,
            0.0,
            macroquad::color::WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                flip_y: true,
                ..Default::default()
            },
        );

        clock.wait();
        next_frame().await;
    }
}
