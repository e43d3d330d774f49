//! CLI-specific error formatting for user-facing messages.

use crate::error::VoicecraftError;

/// Map a [`VoicecraftError`] to a user-facing help string with actionable guidance.
pub fn format_error_help(err: &VoicecraftError) -> String {
    match err {
        VoicecraftError::MissingCredential { provider, env_var } => {
            format!("Missing credentials for {provider}. Set {env_var} in your environment or .env file")
        }
        VoicecraftError::InvalidVoice { .. } => {
            format!("{err}. Run: voicecraft voices")
        }
        VoicecraftError::ConfigNotFound(_) => {
            format!("{err}. Pass a config with -c/--config")
        }
        VoicecraftError::Authentication(msg) => {
            format!("Authentication failed: {msg}. Check your API key")
        }
        other => format!("{other}"),
    }
}
