//! Default values for configuration and capability detection.

pub const ENV_CONFIG: &str = "PIPELINE_REGISTRY_CONFIG";
pub const ENV_EAGER: &str = "PIPELINE_REGISTRY_EAGER";
pub const ENV_PROBE_ON_INIT: &str = "PIPELINE_REGISTRY_PROBE_ON_INIT";
pub const ENV_DISABLE: &str = "PIPELINE_REGISTRY_DISABLE";
pub const ENV_ENABLE: &str = "PIPELINE_REGISTRY_ENABLE";

pub const CONFIG_DIR_NAME: &str = "pipeline-registry";
pub const CONFIG_FILE_NAME: &str = "registry.json";

pub const TRUTHY: &[&str] = &["1", "true", "yes", "on"];

pub const LIBRARY_PATH_VARS: &[&str] = &["LD_LIBRARY_PATH", "DYLD_LIBRARY_PATH"];
pub const SYSTEM_LIBRARY_DIRS: &[&str] = &[
    "/usr/local/lib",
    "/usr/lib",
    "/usr/lib64",
    "/usr/lib/x86_64-linux-gnu",
    "/usr/lib/aarch64-linux-gnu",
    "/opt/homebrew/lib",
];

pub const EAGER: bool = false;
pub const PROBE_ON_INIT: bool = true;

pub fn eager() -> bool { EAGER }
pub fn probe_on_init() -> bool { PROBE_ON_INIT }

pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value))
}
