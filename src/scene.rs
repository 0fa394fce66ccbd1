//! Draw lists handed to whatever rasterizes the plane.
//!
//! A [`SceneDescriptor`] is an ordered list of commands. Order is paint order:
//! grid lines come first, then the basis axes, then user vectors with their
//! labels, so nothing in the foreground is covered by the background.

use glam::DVec2;

use crate::color::Color;

pub const LABEL_FONT_NAME: &str = "Consolas";
pub const LABEL_FONT_SIZE: f64 = 12.0;
/// Pixel offset of a label from the endpoint it annotates.
pub const LABEL_OFFSET: DVec2 = DVec2::new(10.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Grid,
    Axis,
    Vector,
}

/// Line segment in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCommand {
    pub layer: Layer,
    pub from: DVec2,
    pub to: DVec2,
    pub color: Color,
}

/// Text placed at a window position.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCommand {
    pub text: String,
    pub position: DVec2,
    pub font_name: &'static str,
    pub font_size: f64,
}

impl LabelCommand {
    /// Label showing `coordinates` rounded to three decimals, placed at
    /// `anchor` plus [`LABEL_OFFSET`].
    pub fn coordinates(coordinates: DVec2, anchor: DVec2) -> Self {
        Self {
            text: format_coordinates(coordinates),
            position: anchor + LABEL_OFFSET,
            font_name: LABEL_FONT_NAME,
            font_size: LABEL_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LineCommand),
    Label(LabelCommand),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescriptor {
    commands: Vec<DrawCommand>,
}

impl SceneDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, layer: Layer, from: DVec2, to: DVec2, color: Color) -> &mut Self {
        self.commands.push(DrawCommand::Line(LineCommand {
            layer,
            from,
            to,
            color,
        }));
        self
    }

    pub fn label(&mut self, label: LabelCommand) -> &mut Self {
        self.commands.push(DrawCommand::Label(label));
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineCommand> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line(line) => Some(line),
            DrawCommand::Label(_) => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelCommand> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label(label) => Some(label),
            DrawCommand::Line(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl IntoIterator for SceneDescriptor {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a SceneDescriptor {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Rounds to three decimals on the exact binary value, so `1.0005` (stored
/// just below it) gives `1.0`. Whole numbers keep one trailing zero.
fn format_coordinate(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v.abs() >= 1e16 {
        let s = format!("{v:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }

    let fixed = format!("{v:.3}");
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// `"x, y"` with three decimals at most.
pub fn format_coordinates(p: DVec2) -> String {
    format!("{}, {}", format_coordinate(p.x), format_coordinate(p.y))
}
