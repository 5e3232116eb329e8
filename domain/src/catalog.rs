/// Model variants the chat UI offers. Selection is per-session and not
/// persisted anywhere.
pub const KNOWN_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-3-flash-preview",
    "gemini-3-pro-preview",
];

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub fn is_known_model(name: &str) -> bool {
    KNOWN_MODELS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_in_catalog() {
        assert!(is_known_model(DEFAULT_MODEL));
    }

    #[test]
    fn unknown_model_rejected() {
        assert!(!is_known_model("gpt-4o"));
        assert!(!is_known_model(""));
    }
}
