#![forbid(unsafe_code)]

mod persist;
mod rendering;

pub use persist::{config_from_json, load_config, write_export};
pub use rendering::{
    init_logging, render_occupancy_ascii, render_occupancy_image, render_occupancy_to_png,
    RenderConfig,
};
