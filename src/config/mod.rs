mod filesystem;
mod legacy;
mod loader;
mod model;
mod validation;

pub use filesystem::{FileSystem, RealFileSystem};
pub use legacy::{LegacyConfig, Migration};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult};
pub use model::{
    CONFIG_VERSION, CONFIG_VERSION_V1, Config, DEFAULT_HIGH_THRESHOLD, DEFAULT_NORMAL_THRESHOLD,
    DEFAULT_PATTERN, HealthConfig, HistoryConfig, PriorityThresholds, ReferenceConfig,
    ThresholdsConfig,
};
pub use validation::{
    ThresholdValidation, split_pattern, validate_config_semantics, validate_pattern,
};
