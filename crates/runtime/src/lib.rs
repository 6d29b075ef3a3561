mod config;
pub mod logging;

pub use config::{
    DEFAULT_INCREMENT_MINUTES, DISPLAY_FORMAT, IMAGE_EXTENSIONS, PROGRAM_EXTENSIONS,
    PROGRAM_LOG_LEVEL, PROGRAM_NAME, START_FORMATS, default_extensions, default_pick_dir,
    split_extension_list,
};

pub use logging::init;
