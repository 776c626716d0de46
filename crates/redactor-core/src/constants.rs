//! Fixed values of the redaction pipeline

/// Display name given to every de-identification template this function registers
pub const TEMPLATE_DISPLAY_NAME: &str = "Demo DeIdentification Template";

/// Object prefix under the redacted bucket that receives de-identified output
pub const DEIDENTIFIED_PREFIX: &str = "deidentified_content/";

/// URL scheme for Cloud Storage object references
pub const GCS_SCHEME: &str = "gs://";

pub const DEFAULT_RAW_BUCKET: &str = "cloud-dlp-demo-raw-bucket";
pub const DEFAULT_REDACTED_BUCKET: &str = "cloud-dlp-demo-redacted-bucket";
pub const DEFAULT_BQ_DATASET_ID: &str = "cloud_dlp_demo_dlp_results";
pub const DEFAULT_LOG_NAME: &str = "DLP-redaction-demo";

pub const DEFAULT_DLP_API_URL: &str = "https://dlp.googleapis.com";
pub const DEFAULT_LOGGING_API_URL: &str = "https://logging.googleapis.com";
pub const DEFAULT_METADATA_URL: &str = "http://metadata.google.internal";
