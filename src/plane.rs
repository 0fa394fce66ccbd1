use glam::{DVec2, UVec2};
use tracing::{debug, warn};

use crate::color::Color;
use crate::error::{PlaneError, Result};
use crate::scene::{LabelCommand, Layer, SceneDescriptor};
use crate::vector::{Combine, PlaneVector};

/// A basis-scaled plane mapped onto a window.
///
/// Plane coordinates run from `-basis` to `+basis` on each axis and cover the
/// whole window, with the plane origin at the window centre. Window pixels are
/// measured from the bottom-left corner, so window y and plane y both grow
/// upward.
#[derive(Debug, Clone)]
pub struct CoordinateSpace {
    basis : DVec2,
    window_size : UVec2,
    gridlines : u32,
    vectors : Vec<PlaneVector>,
}

impl CoordinateSpace {
    /// Basis components must be finite and strictly positive and the window
    /// must have a non-zero area; the transforms divide by both.
    pub fn new(basis : DVec2, window_size : UVec2, gridlines : u32) -> Result<Self> {
        if !(basis.is_finite() && basis.x > 0.0 && basis.y > 0.0) {
            return Err(PlaneError::InvalidBasis { x: basis.x, y: basis.y });
        }
        if window_size.x == 0 || window_size.y == 0 {
            return Err(PlaneError::InvalidWindowSize {
                width: window_size.x,
                height: window_size.y,
            });
        }

        Ok(Self {
            basis,
            window_size,
            gridlines,
            vectors : Vec::new(),
        })
    }

    pub fn basis(&self) -> DVec2 { self.basis }
    pub fn window_size(&self) -> UVec2 { self.window_size }
    pub fn gridlines(&self) -> u32 { self.gridlines }
    pub fn vectors(&self) -> &[PlaneVector] { &self.vectors }
    pub fn len(&self) -> usize { self.vectors.len() }
    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    pub fn window_center(&self) -> DVec2 {
        self.window_size.as_dvec2() / 2.0
    }

    // ((0, w), (0, h)) -> ((-i, i), (-j, j))
    pub fn to_plane(&self, window : DVec2) -> DVec2 {
        (window / self.window_size.as_dvec2() - 0.5) * 2.0 * self.basis
    }

    // ((-i, i), (-j, j)) -> ((0, w), (0, h))
    pub fn to_window(&self, plane : DVec2) -> DVec2 {
        (plane + self.basis) * self.window_size.as_dvec2() / (2.0 * self.basis)
    }

    /// Appends a vector given in window pixels, converting both ends to plane
    /// coordinates. A missing color is picked at random.
    pub fn append_window_space(&mut self, origin : DVec2, endpoint : DVec2, color : Option<Color>) -> &PlaneVector {
        let vector = PlaneVector::with_color(
            self.to_plane(origin),
            self.to_plane(endpoint),
            color.unwrap_or_else(Color::random),
        );
        self.append_plane_space(vector)
    }

    pub fn append_plane_space(&mut self, vector : PlaneVector) -> &PlaneVector {
        debug!(origin = ?vector.origin(), endpoint = ?vector.endpoint(), "appending vector");
        self.vectors.push(vector);
        &self.vectors[self.vectors.len() - 1]
    }

    /// Pops the top vector. Empty planes are left alone.
    pub fn remove_last(&mut self) -> Option<PlaneVector> {
        let removed = self.vectors.pop();
        match &removed {
            Some(v) => debug!(endpoint = ?v.endpoint(), remaining = self.vectors.len(), "removed vector"),
            None => debug!("nothing to remove"),
        }
        removed
    }

    /// The two most recently added vectors, oldest first.
    pub fn last_two(&self) -> Option<(&PlaneVector, &PlaneVector)> {
        match self.vectors.as_slice() {
            [.., a, b] => Some((a, b)),
            _ => None,
        }
    }

    /// Appends `vectors[n-2] op vectors[n-1]`.
    pub fn combine_last_two(&mut self, op : Combine) -> Result<&PlaneVector> {
        let combined = match self.last_two() {
            Some((lhs, rhs)) => lhs.combine(op, rhs),
            None => {
                return Err(PlaneError::NotEnoughVectors {
                    required : 2,
                    present : self.vectors.len(),
                })
            }
        };
        debug!(?op, "combining last two vectors");
        Ok(self.append_plane_space(combined))
    }

    /// Densest grid worth drawing: one line per pixel along the longer window
    /// side.
    pub fn max_gridlines(&self) -> u32 {
        self.window_size.max_element()
    }

    /// Doubles the gridline count, up to [`max_gridlines`](Self::max_gridlines).
    /// Returns whether anything changed.
    pub fn increase_grid_density(&mut self) -> bool {
        match self.gridlines.checked_mul(2) {
            Some(doubled) if doubled > self.max_gridlines() => {
                warn!(gridlines = self.gridlines, limit = self.max_gridlines(), "grid is already at its densest");
                false
            }
            Some(doubled) if doubled != self.gridlines => {
                debug!(from = self.gridlines, to = doubled, "increasing grid density");
                self.gridlines = doubled;
                true
            }
            Some(_) => false,
            None => {
                warn!(gridlines = self.gridlines, "gridline count cannot be doubled further");
                false
            }
        }
    }

    /// Halves the gridline count while it is at least 2; 1 and 0 stay put.
    pub fn decrease_grid_density(&mut self) -> bool {
        if self.gridlines < 2 {
            return false;
        }
        let halved = self.gridlines / 2;
        debug!(from = self.gridlines, to = halved, "decreasing grid density");
        self.gridlines = halved;
        true
    }

    /// Builds the draw list for the current state: grid, then axes, then
    /// vectors (each followed by its label when labels are on).
    pub fn assemble_scene(&self, show_basis_vectors : bool, show_coordinate_labels : bool) -> SceneDescriptor {
        let mut scene = SceneDescriptor::new();

        if self.gridlines > 1 {
            let step = 2.0 / self.gridlines as f64;
            for i in 0..self.gridlines {
                let offset = i as f64 * step;

                let y = -self.basis.y + offset;
                scene.line(
                    Layer::Grid,
                    self.to_window(DVec2::new(-self.basis.x, y)),
                    self.to_window(DVec2::new(self.basis.x, y)),
                    Color::GRID,
                );

                let x = -self.basis.x + offset;
                scene.line(
                    Layer::Grid,
                    self.to_window(DVec2::new(x, -self.basis.y)),
                    self.to_window(DVec2::new(x, self.basis.y)),
                    Color::GRID,
                );
            }
        }

        if show_basis_vectors {
            let origin = self.to_window(DVec2::ZERO);
            scene
                .line(Layer::Axis, origin, self.to_window(DVec2::new(self.basis.x, 0.0)), Color::I_HAT)
                .line(Layer::Axis, origin, self.to_window(DVec2::new(0.0, self.basis.y)), Color::J_HAT);
        }

        for vector in &self.vectors {
            let from = self.to_window(vector.origin());
            let to = self.to_window(vector.endpoint());
            scene.line(Layer::Vector, from, to, vector.color());
            if show_coordinate_labels {
                scene.label(LabelCommand::coordinates(vector.endpoint(), to));
            }
        }

        scene
    }
}
