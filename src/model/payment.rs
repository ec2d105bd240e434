use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How an order was settled. Serialized exactly as `cash` or `qr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Qr,
}

impl PaymentMethod {
    /// Canonicalizes free-form input from the payment screen.
    ///
    /// Input is trimmed and lower-cased. `cash` maps to [`PaymentMethod::Cash`];
    /// everything else, including empty or missing input, falls back to
    /// [`PaymentMethod::Qr`].
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "cash" => PaymentMethod::Cash,
            _ => PaymentMethod::Qr,
        }
    }

    /// Like [`normalize`](Self::normalize) but without the QR fallback:
    /// unrecognized values yield `None`. Used when reading stored orders for
    /// statistics, where an unknown method must not be counted as QR.
    pub fn parse_strict(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "qr" => Some(PaymentMethod::Qr),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Qr => "qr",
        }
    }

    /// Label used in banners ("Cash" / "QR").
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Qr => "QR",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cash_variants() {
        for raw in ["Cash", " cash ", "CASH"] {
            assert_eq!(PaymentMethod::normalize(Some(raw)), PaymentMethod::Cash, "{raw:?}");
        }
    }

    #[test]
    fn test_normalize_defaults_to_qr() {
        for raw in ["qr", "QR", "", "paypal"] {
            assert_eq!(PaymentMethod::normalize(Some(raw)), PaymentMethod::Qr, "{raw:?}");
        }
        assert_eq!(PaymentMethod::normalize(None), PaymentMethod::Qr);
    }

    #[test]
    fn test_parse_strict_rejects_unknown() {
        assert_eq!(PaymentMethod::parse_strict(" Qr"), Some(PaymentMethod::Qr));
        assert_eq!(PaymentMethod::parse_strict("paypal"), None);
        assert_eq!(PaymentMethod::parse_strict(""), None);
    }

    #[test]
    fn test_wire_values_are_lowercase() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cash).unwrap(), "\"cash\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Qr).unwrap(), "\"qr\"");
    }
}
