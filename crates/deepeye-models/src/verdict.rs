//! Risk verdicts derived from classifier responses.

use serde::{Deserialize, Serialize};

/// Binary risk judgment derived from the classifier's accumulated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The classifier indicated a security risk.
    Risk,
    /// The classifier indicated no risk.
    NoRisk,
    /// The classification failed; no judgment was obtained.
    Unknown,
}

impl Verdict {
    /// Derive a verdict from a complete classifier response.
    ///
    /// Substring match: a response containing "yes" anywhere counts as
    /// risk, so a reply like "No, yes-style attacks are not present"
    /// classifies as [`Verdict::Risk`]. This mirrors the Yes/No prompt
    /// contract with the provider.
    pub fn from_response(text: &str) -> Self {
        if text.to_lowercase().contains("yes") {
            Self::Risk
        } else {
            Self::NoRisk
        }
    }

    /// Returns true if this verdict should raise a security alert.
    pub fn is_risk(&self) -> bool {
        matches!(self, Self::Risk)
    }
}

/// Outcome of one classification run. One instance per growth event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The derived risk judgment.
    pub verdict: Verdict,
    /// The full accumulated response text.
    pub raw_text: String,
}

impl ClassificationResult {
    /// Build a result from a complete classifier response.
    pub fn from_response(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        Self {
            verdict: Verdict::from_response(&raw_text),
            raw_text,
        }
    }

    /// Build a result for a failed classification run.
    pub fn unknown(raw_text: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Unknown,
            raw_text: raw_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_yes_is_risk() {
        assert_eq!(
            Verdict::from_response("Yes, this leaks a password"),
            Verdict::Risk
        );
        assert_eq!(Verdict::from_response("YES"), Verdict::Risk);
    }

    #[test]
    fn test_verdict_no_is_no_risk() {
        assert_eq!(Verdict::from_response("No."), Verdict::NoRisk);
        assert_eq!(Verdict::from_response(""), Verdict::NoRisk);
    }

    #[test]
    fn test_verdict_substring_match() {
        // "yes" anywhere in the reply counts, even inside a negation.
        assert_eq!(
            Verdict::from_response("No, yes-style attacks are not present"),
            Verdict::Risk
        );
    }

    #[test]
    fn test_result_from_response() {
        let result = ClassificationResult::from_response("Yes, password exposed");
        assert!(result.verdict.is_risk());
        assert_eq!(result.raw_text, "Yes, password exposed");
    }

    #[test]
    fn test_result_unknown() {
        let result = ClassificationResult::unknown("stream terminated");
        assert_eq!(result.verdict, Verdict::Unknown);
        assert!(!result.verdict.is_risk());
    }
}
