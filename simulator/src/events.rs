//! Translation of simulator window events into grid input events.

use embedded_graphics::prelude::Point;
use embedded_graphics_simulator::SimulatorEvent;
use embedded_graphics_simulator::sdl2::{Keycode, MouseButton as SdlButton};
use skylink_grid::{InputEvent, KeyAction, KeyCode, MouseButton};

/// What one window event means to the loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowInput {
    /// Close the simulator.
    Quit,
    /// Forward to the dispatcher.
    Grid(InputEvent),
}

/// Map a window event, or `None` if the grid has no use for it.
pub fn translate(event: SimulatorEvent) -> Option<WindowInput> {
    match event {
        SimulatorEvent::Quit => Some(WindowInput::Quit),
        SimulatorEvent::KeyDown { keycode, repeat, .. } => {
            let key = key_code(keycode)?;
            if key == KeyCode::ESCAPE {
                return Some(WindowInput::Quit);
            }
            let action = if repeat { KeyAction::Repeat } else { KeyAction::Press };
            Some(WindowInput::Grid(InputEvent::Key { key, action }))
        }
        SimulatorEvent::KeyUp { keycode, .. } => Some(WindowInput::Grid(InputEvent::Key {
            key: key_code(keycode)?,
            action: KeyAction::Release,
        })),
        SimulatorEvent::MouseButtonDown { mouse_btn, point } => mouse(mouse_btn, point, true),
        SimulatorEvent::MouseButtonUp { mouse_btn, point } => mouse(mouse_btn, point, false),
        _ => None,
    }
}

fn mouse(
    button: SdlButton,
    point: Point,
    pressed: bool,
) -> Option<WindowInput> {
    Some(WindowInput::Grid(InputEvent::Mouse {
        button: mouse_button(button)?,
        pressed,
        x: point.x as f32,
        y: point.y as f32,
    }))
}

fn key_code(keycode: Keycode) -> Option<KeyCode> { key_from_name(&keycode.name()) }

fn mouse_button(button: SdlButton) -> Option<MouseButton> {
    match button {
        SdlButton::Left => Some(MouseButton::Primary),
        SdlButton::Right => Some(MouseButton::Secondary),
        SdlButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Map an SDL key name onto the grid's key numbering.
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    match name {
        "Escape" => Some(KeyCode::ESCAPE),
        "Return" => Some(KeyCode::ENTER),
        "Space" => Some(KeyCode::SPACE),
        _ => {
            let mut bytes = name.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(byte), None) if byte.is_ascii_graphic() => Some(KeyCode::from_ascii(byte)),
                _ => None,
            }
        }
    }
}
