mod line_renderer;
mod types;
mod viewer;
mod window_surface;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vecplane::{App, PlaneConfig};

fn main() {
    let config = PlaneConfig::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("{e}, falling back to the default plane");
            let fallback = PlaneConfig {
                log_filter: config.log_filter.clone(),
                ..PlaneConfig::default()
            };
            match App::new(&fallback) {
                Ok(app) => app,
                Err(e) => {
                    error!("default plane is invalid: {e}");
                    return;
                }
            }
        }
    };

    let size = app.plane().window_size();
    info!(
        width = size.x,
        height = size.y,
        gridlines = app.plane().gridlines(),
        "starting vecplane"
    );

    viewer::Viewer::new(app).run();
}
