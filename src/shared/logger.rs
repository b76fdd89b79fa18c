//! Re-export of the workspace `logger` crate so library users can reach it
//! through `mindmap_export::shared::logger`.

pub use logger::{
    close_file_logging, current_level, disable_debug, disable_verbose, enable_debug,
    enable_verbose, init_file_logging, is_debug_enabled, is_verbose_enabled, set_level,
    set_level_from_str, Level, ParseLevelError,
};
