mod config;
pub mod logging;

pub use config::{
    CONFIG_FILE_NAME, ConfigLocation, ConfigSource, PROGRAM_CONFIG, PROGRAM_LOG_LEVEL,
    PROGRAM_NAME, resolve_config_path, user_config_dir,
};
