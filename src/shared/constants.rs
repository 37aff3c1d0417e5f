/// Maximum length of a category name, in characters
pub const CATEGORY_NAME_MAX_LENGTH: usize = 255;

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";
