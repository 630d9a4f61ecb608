//! Log sanitization utilities for PII filtering.
//!
//! String-based sanitization applied to log output before it reaches the
//! file or stdout:
//! - Email addresses (login identifiers)
//! - Password-shaped `key=value` pairs
//!
//! Sanitizing strings is a defense-in-depth fallback; the primary
//! protection is that form values and credentials never reach logging
//! calls in the first place.

use std::io::Write;
use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

/// A compiled pattern with its replacement text.
struct PiiPattern {
    regex: Regex,
    replacement: &'static str,
}

static PII_PATTERNS: OnceLock<Vec<PiiPattern>> = OnceLock::new();

fn patterns() -> &'static [PiiPattern] {
    PII_PATTERNS.get_or_init(|| {
        let rules: [(&str, &str); 2] = [
            // Email patterns (bounded labels; case-insensitive)
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            // Credential pairs that could leak through error text
            (
                r"(?i)\b(?:password|passwd|pwd|secret|token)\b\s*[:=]\s*\S+",
                "[REDACTED-SECRET]",
            ),
        ];

        rules
            .into_iter()
            .map(|(pattern, replacement)| PiiPattern {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect()
    })
}

/// Replace PII occurrences in the input with redaction markers.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let mut output = input.to_string();
    for pattern in patterns() {
        if pattern.regex.is_match(&output) {
            output = pattern
                .regex
                .replace_all(&output, pattern.replacement)
                .into_owned();
        }
    }
    output
}

/// `MakeWriter` wrapper that sanitizes every log line before writing.
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
        }
    }
}

/// Writer that sanitizes each buffer it receives.
pub struct SanitizingWriter<W> {
    inner: W,
}

impl<W: Write> Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let clean = sanitize(&text);
        self.inner.write_all(clean.as_bytes())?;
        // Report the original length so tracing does not retry the tail.
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_email() {
        let out = sanitize("login accepted for jo.smith@clinic.example.org today");
        assert_eq!(out, "login accepted for [REDACTED-EMAIL] today");
    }

    #[test]
    fn test_redacts_credential_pair() {
        let out = sanitize("request failed: password=hunter22 rejected");
        assert!(out.contains("[REDACTED-SECRET]"));
        assert!(!out.contains("hunter22"));
    }

    #[test]
    fn test_clean_text_untouched() {
        let line = "Submitting intake for risk assessment";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_writer_sanitizes_buffer() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter { inner: &mut sink };
            writer
                .write_all(b"attempt by a@b.com denied")
                .expect("write");
        }
        let written = String::from_utf8(sink).expect("utf8");
        assert_eq!(written, "attempt by [REDACTED-EMAIL] denied");
    }
}
