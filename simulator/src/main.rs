//! Desktop simulator for the skylink grid dashboard.
//!
//! Opens an `embedded-graphics-simulator` window, feeds one value per frame
//! into a [`DashboardSession`] and forwards keyboard and mouse input to it.
//!
//! Controls: `A` turns row 1 blue and pokes the bottom-left cell, clicking the
//! bottom-left cell logs the hit, `Escape` quits.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod cli;
mod events;
mod telemetry;
mod timing;

use std::process::ExitCode;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, Window};
use skylink_grid::{
    BlueTriangleStrategy,
    CellStrategy,
    DashboardSession,
    DataFeed,
    DisplaySurface,
    InputEvent,
    KeyCode,
    SineFeed,
    UniformFeed,
};
use tracing::{error, info};

use crate::cli::{Cli, FeedKind};
use crate::events::{WindowInput, translate};
use crate::timing::FrameClock;

/// Row restyled by the `A` shortcut.
const SHORTCUT_ROW: usize = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.log_level);

    let config = cli.grid_config();
    let mut session = match DashboardSession::new(config) {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "cannot build grid");
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    register_controls(&mut session);

    let mut feed = make_feed(&cli);
    let size = Size::new(config.canvas_width as u32, config.canvas_height as u32);
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(size);
    let output_settings = OutputSettingsBuilder::new().scale(cli.scale.max(1)).build();
    let mut window = Window::new("Skylink Grid Sim", &output_settings);
    info!(rows = config.rows, cols = config.cols, feed = ?cli.feed, "simulator started");

    let mut clock = FrameClock::new();
    let mut pending: Vec<InputEvent> = Vec::new();
    loop {
        clock.begin();

        {
            let mut surface = DisplaySurface::new(&mut display);
            session.frame(pending.drain(..), Some(feed.next_value()), &mut surface);
        }
        window.update(&display);

        for input in window.events().filter_map(translate) {
            match input {
                WindowInput::Quit => {
                    info!("simulator closed");
                    return ExitCode::SUCCESS;
                }
                WindowInput::Grid(event) => pending.push(event),
            }
        }

        if let Some(fps) = clock.finish() {
            info!(fps, "frame rate");
        }
    }
}

fn make_feed(cli: &Cli) -> Box<dyn DataFeed> {
    match cli.feed {
        FeedKind::Uniform => {
            let seed = cli.seed.unwrap_or_else(clock_seed);
            info!(seed, "uniform feed");
            Box::new(UniformFeed::with_seed(seed))
        }
        FeedKind::Sine => Box::new(SineFeed::default()),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

fn blue() -> Box<dyn CellStrategy> { Box::new(BlueTriangleStrategy) }

fn register_controls(session: &mut DashboardSession) {
    session.dispatcher_mut().bind_row_strategy(KeyCode::A, SHORTCUT_ROW, blue);

    let Some(cell) = session.grid().get_cell(0, 0) else { return };
    let weak = Rc::downgrade(&cell);
    let mut cell = cell.borrow_mut();
    cell.set_key_callback(KeyCode::A, move || {
        if let Some(cell) = weak.upgrade() {
            info!(data = cell.borrow().data(), "key A on cell (0, 0)");
        }
    });
    cell.set_mouse_callback(|| info!("click on cell (0, 0)"));
}

#[cfg(test)]
mod tests {
    use skylink_grid::{GridConfig, KeyAction, RecordingSurface};

    use super::*;

    #[test]
    fn test_key_a_restyles_row_and_fires_cell_callback() {
        let mut session = DashboardSession::new(GridConfig::default()).unwrap();
        register_controls(&mut session);

        let press = InputEvent::Key {
            key: KeyCode::A,
            action: KeyAction::Press,
        };
        let mut surface = RecordingSurface::new();
        let outcome = session.frame([press], None, &mut surface);
        assert_eq!(outcome.callbacks_fired, 1);
        assert_eq!(outcome.cells_restyled, 4);
    }
}
