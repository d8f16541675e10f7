//! Utterance builder rendering to plain text or SSML.
//!
//! Words are separated by single spaces. Pauses render only in SSML.
//! Punctuation attaches to the preceding token.

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Punct(&'static str),
    Pause(u32),
    Cardinal(String),
    Time(String),
}

/// A sentence sequence that can be spoken or displayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Utterance {
    tokens: Vec<Token>,
}

impl Utterance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.tokens.push(Token::Text(text.into()));
        self
    }

    pub fn punct(mut self, punct: &'static str) -> Self {
        self.tokens.push(Token::Punct(punct));
        self
    }

    /// `<break time="{ms}ms"/>`.
    pub fn pause(mut self, ms: u32) -> Self {
        self.tokens.push(Token::Pause(ms));
        self
    }

    /// A number read as a cardinal, e.g. "5.24" as "five point two four".
    pub fn cardinal(mut self, number: impl Into<String>) -> Self {
        self.tokens.push(Token::Cardinal(number.into()));
        self
    }

    /// A clock time in `HH:MM`.
    pub fn time(mut self, hh_mm: impl Into<String>) -> Self {
        self.tokens.push(Token::Time(hh_mm.into()));
        self
    }

    pub fn plain(&self) -> String {
        self.render(false)
    }

    /// Render wrapped in `<speak>`.
    pub fn ssml(&self) -> String {
        format!("<speak>{}</speak>", self.render(true))
    }

    fn render(&self, ssml: bool) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let piece = match token {
                Token::Punct(p) => {
                    out.push_str(p);
                    continue;
                }
                Token::Pause(_) if !ssml => continue,
                Token::Pause(ms) => format!("<break time=\"{}ms\"/>", ms),
                Token::Text(t) if ssml => escape(t),
                Token::Text(t) => t.clone(),
                Token::Cardinal(n) if ssml => {
                    format!("<say-as interpret-as=\"cardinal\">{}</say-as>", escape(n))
                }
                Token::Time(t) if ssml => {
                    format!("<say-as interpret-as=\"time\">{}</say-as>", escape(t))
                }
                Token::Cardinal(v) | Token::Time(v) => v.clone(),
            };
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&piece);
        }
        out
    }
}

/// Escape the XML special characters SSML engines reject.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Insert `fragment` just before the closing `</speak>` tag.
pub fn append_before_close(ssml: &str, fragment: &str) -> String {
    match ssml.strip_suffix("</speak>") {
        Some(body) if body.is_empty() => format!("{}{}</speak>", body, fragment),
        Some(body) => format!("{} {}</speak>", body, fragment),
        None => format!("<speak>{} {}</speak>", escape(ssml), fragment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Utterance {
        Utterance::new()
            .text("Price is")
            .pause(200)
            .cardinal("5.24")
            .text("cents at")
            .time("08:00")
            .punct(".")
    }

    #[test]
    fn test_plain_drops_markup() {
        assert_eq!(sample().plain(), "Price is 5.24 cents at 08:00.");
    }

    #[test]
    fn test_ssml_wraps_tokens() {
        assert_eq!(
            sample().ssml(),
            "<speak>Price is <break time=\"200ms\"/> \
             <say-as interpret-as=\"cardinal\">5.24</say-as> cents at \
             <say-as interpret-as=\"time\">08:00</say-as>.</speak>"
        );
    }

    #[test]
    fn test_text_is_escaped_in_ssml_only() {
        let u = Utterance::new().text("R&D <test>");
        assert_eq!(u.plain(), "R&D <test>");
        assert_eq!(u.ssml(), "<speak>R&amp;D &lt;test&gt;</speak>");
    }

    #[test]
    fn test_append_before_close() {
        assert_eq!(
            append_before_close("<speak>Hi.</speak>", "Anything else?"),
            "<speak>Hi. Anything else?</speak>"
        );
        assert_eq!(
            append_before_close("<speak></speak>", "Bye."),
            "<speak>Bye.</speak>"
        );
        assert_eq!(
            append_before_close("plain", "Bye."),
            "<speak>plain Bye.</speak>"
        );
    }
}
