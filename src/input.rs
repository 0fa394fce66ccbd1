//! Pointer, key and scroll events, and the application context they drive.

use glam::DVec2;
use tracing::{debug, warn};

use crate::config::{AnchorMode, PlaneConfig};
use crate::error::Result;
use crate::plane::CoordinateSpace;
use crate::scene::SceneDescriptor;
use crate::vector::Combine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Other,
}

/// Positions are window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: DVec2, button: PointerButton },
    PointerUp { position: DVec2, button: PointerButton },
    KeyUp(Key),
    Scroll { delta_y: f64 },
}

/// Everything the viewer needs between frames: the plane, the pending click
/// and the display switches.
#[derive(Debug, Clone)]
pub struct App {
    plane: CoordinateSpace,
    anchor_mode: AnchorMode,
    pending_anchor: Option<DVec2>,
    show_basis_vectors: bool,
    show_coordinate_labels: bool,
}

impl App {
    pub fn new(config: &PlaneConfig) -> Result<Self> {
        let plane = CoordinateSpace::new(config.basis(), config.window_size(), config.gridlines)?;
        Ok(Self::with_plane(plane, config))
    }

    pub fn with_plane(plane: CoordinateSpace, config: &PlaneConfig) -> Self {
        Self {
            plane,
            anchor_mode: config.anchor,
            pending_anchor: None,
            show_basis_vectors: !config.hide_basis_vectors,
            show_coordinate_labels: !config.hide_coordinate_labels,
        }
    }

    pub fn plane(&self) -> &CoordinateSpace {
        &self.plane
    }

    pub fn pending_anchor(&self) -> Option<DVec2> {
        self.pending_anchor
    }

    pub fn scene(&self) -> SceneDescriptor {
        self.plane
            .assemble_scene(self.show_basis_vectors, self.show_coordinate_labels)
    }

    /// Applies one event. Returns `true` when the next scene will differ.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { position, button } => self.pointer_down(position, button),
            InputEvent::PointerUp { position, button } => self.pointer_up(position, button),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::Scroll { delta_y } => self.scroll(delta_y),
        }
    }

    fn pointer_down(&mut self, position: DVec2, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => {
                self.pending_anchor = Some(position);
                false
            }
            PointerButton::Secondary => self.plane.remove_last().is_some(),
            PointerButton::Other => false,
        }
    }

    fn pointer_up(&mut self, position: DVec2, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }

        let pressed = self.pending_anchor.take();
        let origin = match self.anchor_mode {
            AnchorMode::Center => self.plane.window_center(),
            AnchorMode::Press => match pressed {
                Some(p) => p,
                None => {
                    debug!(?position, "release without a press, ignoring");
                    return false;
                }
            },
        };

        if origin == position {
            debug!(?position, "zero length vector, ignoring");
            return false;
        }

        self.plane.append_window_space(origin, position, None);
        true
    }

    fn key_up(&mut self, key: Key) -> bool {
        let op = match key {
            Key::Character(c) => Combine::from_key(c),
            Key::Other => None,
        };
        let Some(op) = op else {
            return false;
        };

        match self.plane.combine_last_two(op) {
            Ok(_) => true,
            Err(e) => {
                warn!(?op, "{e}");
                false
            }
        }
    }

    fn scroll(&mut self, delta_y: f64) -> bool {
        if delta_y > 0.0 {
            self.plane.increase_grid_density()
        } else if delta_y < 0.0 {
            self.plane.decrease_grid_density()
        } else {
            false
        }
    }
}
