use anyhow::Result;
use image::Rgba;
use log::{info, warn};
use std::sync::Arc;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use crate::core::Rect;
use engine::game_loop::FrameClock;
use engine::renderer::{Canvas, Screen};
use game::characters::{
    stock_catalog, AnimationSettings, Equipment, Player, PlayerStats, Thrust, DEFAULT_LOADOUT,
};

const SCREEN_WIDTH: u32 = 800;
const SCREEN_HEIGHT: u32 = 600;
const WALL_THICKNESS: u32 = 10;
const GROUND: Rgba<u8> = Rgba([70, 110, 60, 255]);
const SCREENSHOT_PATH: &str = "frame.png";

/// Damage dealt by the H debug key
const DEBUG_HIT_DAMAGE: i32 = 5;

/// Solid border around the screen
fn arena_walls() -> [Rect; 4] {
    let (w, h, t) = (SCREEN_WIDTH, SCREEN_HEIGHT, WALL_THICKNESS);
    [
        Rect::new(0, 0, w, t),
        Rect::new(0, (h - t) as i32, w, t),
        Rect::new(0, 0, t, h),
        Rect::new((w - t) as i32, 0, t, h),
    ]
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Knight...");

    let stats = PlayerStats::default();
    let settings = AnimationSettings::default();
    let catalog = stock_catalog(stats.cell_size);
    let equipment = Equipment::from_catalog(&catalog, &DEFAULT_LOADOUT)?;

    let spawn = Rect::new(
        ((SCREEN_WIDTH - stats.cell_size.0) / 2) as i32,
        ((SCREEN_HEIGHT - stats.cell_size.1) / 2) as i32,
        stats.cell_size.0,
        stats.cell_size.1,
    );
    let mut player = Player::new(
        spawn,
        &stats,
        &settings,
        equipment,
        Box::new(Thrust::pitchfork(stats.cell_size)),
    );

    let walls = arena_walls();
    let mut canvas = Canvas::filled(SCREEN_WIDTH, SCREEN_HEIGHT, GROUND);
    let mut clock = FrameClock::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Rusted Knight")
            .with_inner_size(winit::dpi::LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut screen =
        pollster::block_on(Screen::new(Arc::clone(&window), (SCREEN_WIDTH, SCREEN_HEIGHT)))?;

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                screen.resize(physical_size);
            }
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state,
                                repeat,
                                ..
                            },
                        ..
                    },
                ..
            } => match (state, code) {
                (ElementState::Pressed, KeyCode::Space) => player.attack(clock.now()),
                (ElementState::Pressed, KeyCode::KeyP) if !repeat => clock.toggle_pause(),
                (ElementState::Pressed, KeyCode::KeyH) if !repeat => {
                    player.got_hit(DEBUG_HIT_DAMAGE)
                }
                (ElementState::Pressed, KeyCode::F12) if !repeat => {
                    match canvas.save(SCREENSHOT_PATH) {
                        Ok(()) => info!("Saved frame to {}", SCREENSHOT_PATH),
                        Err(e) => warn!("Could not save frame: {}", e),
                    }
                }
                (ElementState::Pressed, code) if !repeat => player.add_direction(code),
                (ElementState::Released, code) => player.pop_direction(code),
                _ => {}
            },
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                canvas.fill(GROUND);
                player.draw(&mut canvas);
                if let Err(e) = screen.present(&canvas) {
                    warn!("Failed to present frame: {}", e);
                }
            }
            Event::AboutToWait => {
                let frame = clock.tick();
                if !clock.is_paused() {
                    player.update(frame.now, frame.dt);
                    if walls.iter().any(|wall| wall.intersects(&player.rect())) {
                        player.collide_with_solid();
                    }
                }

                window.set_title(&format!(
                    "Rusted Knight - HP {} - {:.0} fps",
                    player.health(),
                    clock.fps()
                ));
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
