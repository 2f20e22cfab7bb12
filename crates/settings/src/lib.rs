//! Shared configuration, default paths and file logging for the romshelf tools.
//!
//! Every binary loads [`Settings`] once at startup and passes it down
//! explicitly; nothing here is global apart from the tracing subscriber.

mod config;
mod logging;
pub mod paths;

pub use config::{API_KEY_ENV, CONFIG_PATH_ENV, DOTENV_FILE_NAME, Settings, SettingsError, read_dotenv};
pub use logging::{LOG_FILE_NAME, LogMode, init_console_logging, init_file_logging};
