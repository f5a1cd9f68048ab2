//! Text sanitization applied around every model call.
//!
//! The default policy only removes `<` and `>`. It is a markup-injection
//! mitigation, not a security boundary: nothing is escaped, encoding is not
//! validated and length is not limited.

/// Input/output transform used by the AI service.
pub trait SanitizationPolicy: Send + Sync {
    /// Clean text before it is sent to a model.
    fn sanitize_input(&self, input: &str) -> String;

    /// Clean text returned by a model before it reaches the caller.
    fn validate_output(&self, output: &str) -> String;
}

/// Characters stripped by [`SecurityManager`].
const STRIPPED_CHARS: [char; 2] = ['<', '>'];

/// Default policy: strips every angle bracket.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityManager;

impl SecurityManager {
    pub fn new() -> Self {
        Self
    }
}

fn strip_angle_brackets(text: &str) -> String {
    text.replace(&STRIPPED_CHARS[..], "")
}

impl SanitizationPolicy for SecurityManager {
    fn sanitize_input(&self, input: &str) -> String {
        strip_angle_brackets(input)
    }

    fn validate_output(&self, output: &str) -> String {
        strip_angle_brackets(output)
    }
}
