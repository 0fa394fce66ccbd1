//! RGBA colors with floating point components in `[0, 1]`.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Uniformly random opaque color from the thread rng.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.gen(), rng.gen(), rng.gen())
    }

    pub fn to_array_f32(self) -> [f32; 4] {
        [self.r as f32, self.g as f32, self.b as f32, self.a as f32]
    }

    pub const I_HAT: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const J_HAT: Color = Color::rgb(0.0, 1.0, 0.0);

    // dark gray, c4B (64, 64, 64, 1)
    pub const GRID: Color = Color::rgba(64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0, 1.0 / 255.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn from_rgba8_matches_grid_constant() {
        assert_eq!(Color::from_rgba8(64, 64, 64, 1), Color::GRID);
    }

    #[test]
    fn random_colors_are_opaque_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let c = Color::random_with(&mut rng);
            for v in [c.r, c.g, c.b] {
                assert!((0.0..1.0).contains(&v));
            }
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = Color::random_with(&mut SmallRng::seed_from_u64(42));
        let b = Color::random_with(&mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn f32_array_keeps_channel_order() {
        assert_eq!(Color::I_HAT.to_array_f32(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color::J_HAT.to_array_f32(), [0.0, 1.0, 0.0, 1.0]);
    }
}
