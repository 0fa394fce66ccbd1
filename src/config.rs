use clap::{Parser, ValueEnum};
use glam::{DVec2, UVec2};

/// Where a clicked vector starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AnchorMode {
    /// Every vector starts at the window centre.
    #[default]
    Center,
    /// Vectors start where the primary button went down.
    Press,
}

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "vecplane", version, about = "Click vectors onto a plane and combine them")]
pub struct PlaneConfig {
    /// Window width in pixels.
    #[arg(long, default_value_t = 720)]
    pub width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Half extent of the plane along x.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub basis_x: f64,

    /// Half extent of the plane along y.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub basis_y: f64,

    /// Grid subdivisions per axis.
    #[arg(long, default_value_t = 16)]
    pub gridlines: u32,

    #[arg(long)]
    pub hide_basis_vectors: bool,

    #[arg(long)]
    pub hide_coordinate_labels: bool,

    #[arg(long, value_enum, default_value_t = AnchorMode::Center)]
    pub anchor: AnchorMode,

    /// Filter directives used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 720,
            basis_x: 1.0,
            basis_y: 1.0,
            gridlines: 16,
            hide_basis_vectors: false,
            hide_coordinate_labels: false,
            anchor: AnchorMode::Center,
            log_filter: "info".to_string(),
        }
    }
}

impl PlaneConfig {
    pub fn basis(&self) -> DVec2 {
        DVec2::new(self.basis_x, self.basis_y)
    }

    pub fn window_size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_defaults_match_default_impl() {
        let parsed = PlaneConfig::try_parse_from(["vecplane"]).unwrap();
        assert_eq!(parsed, PlaneConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = PlaneConfig::try_parse_from([
            "vecplane",
            "--width",
            "1024",
            "--basis-x",
            "2.5",
            "--basis-y",
            "-1",
            "--gridlines",
            "4",
            "--hide-coordinate-labels",
            "--anchor",
            "press",
        ])
        .unwrap();

        assert_eq!(parsed.window_size(), UVec2::new(1024, 720));
        assert_eq!(parsed.basis(), DVec2::new(2.5, -1.0));
        assert_eq!(parsed.gridlines, 4);
        assert!(parsed.hide_coordinate_labels);
        assert!(!parsed.hide_basis_vectors);
        assert_eq!(parsed.anchor, AnchorMode::Press);
    }

    #[test]
    fn unknown_anchor_is_rejected() {
        assert!(PlaneConfig::try_parse_from(["vecplane", "--anchor", "corner"]).is_err());
    }
}
