//! Constants for the webhook relay

/// Fallback webhook URL when nothing else is configured
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook/ai-chat";

/// Environment variable holding the deployment-provided webhook URL
pub const WEBHOOK_URL_ENV: &str = "CHATRELAY_WEBHOOK_URL";

/// Environment variable selecting the wire format (`full` or `latest`)
pub const WIRE_FORMAT_ENV: &str = "CHATRELAY_WIRE_FORMAT";

/// Key under which the runtime override is persisted
pub const DEFAULT_STORE_KEY: &str = "webhook_url";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Message used when the workflow reports failure without details
pub const WORKFLOW_FAILED: &str = "workflow failed";

/// Generic failure reply emitted by the workflow engine
pub const WORKFLOW_ERROR_REPLY: &str = "Error in workflow";
