/// Script endpoint the community hub publishes its articles through.
pub const DEFAULT_API_URL: &str = "https://script.google.com/macros/s/AKfycby7DlTI_iddr3Vbf5HYyuPRZM8dc6xhoyG0FPLzlKvfCp6olKiVttjiZRBAAstyXU2Kwg/exec";

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "ECG_API_URL";
