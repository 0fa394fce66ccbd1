pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod plane;
pub mod scene;
pub mod vector;

pub use color::Color;
pub use config::{AnchorMode, PlaneConfig};
pub use error::{PlaneError, Result};
pub use input::{App, InputEvent, Key, PointerButton};
pub use plane::CoordinateSpace;
pub use scene::{DrawCommand, LabelCommand, Layer, LineCommand, SceneDescriptor};
pub use vector::{Combine, Operand, PlaneVector};
