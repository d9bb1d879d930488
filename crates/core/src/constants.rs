/// Constants used throughout the gsmenv codebase
// Reference marker
pub const REFERENCE_PREFIX: &str = "gcp:";

// Secret name defaults
pub const LATEST_VERSION: &str = "latest";

// Command literal that resolves and writes but never launches
pub const NOOP_COMMAND: &str = "noop";

// Environment variable names
pub const GOOGLE_CLOUD_PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";
pub const GSMENV_LOG_VAR: &str = "GSMENV_LOG";
pub const SECRETMANAGER_ENDPOINT_VAR: &str = "GSMENV_SECRETMANAGER_ENDPOINT";
pub const GCE_METADATA_HOST_VAR: &str = "GCE_METADATA_HOST";
pub const PATH_VAR: &str = "PATH";
pub const GOOGLE_APPLICATION_CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const CLOUDSDK_CONFIG_VAR: &str = "CLOUDSDK_CONFIG";

// Remote endpoints
pub const DEFAULT_SECRETMANAGER_ENDPOINT: &str = "https://secretmanager.googleapis.com";
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

// Credential tooling
pub const GCLOUD_PROGRAM: &str = "gcloud";
pub const ADC_FILE_NAME: &str = "application_default_credentials.json";
