//! Default configuration values

/// Namespace used for in-tree components when none is configured
pub const DEFAULT_NAMESPACE: &str = "local";

/// Channel used for in-tree components when none is configured
pub const DEFAULT_CHANNEL: &str = "stable";

/// Backend profile passed to every build step
pub const DEFAULT_PROFILE: &str = "default";

/// Program invoked by the process backend
pub const DEFAULT_BACKEND_PROGRAM: &str = "conan";

/// Descriptor file name inside `<root>/<name>/<version>/`
pub const RECIPE_FILE: &str = "recipe.toml";

/// Project-level configuration file at the recipe root
pub const PROJECT_CONFIG_FILE: &str = "treebuild.toml";

/// Request keyword selecting every available component
pub const ALL_KEYWORD: &str = "all";
