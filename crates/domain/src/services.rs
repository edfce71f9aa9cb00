//! Registry of known services with their short tags and alert topics.

use crate::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A service that owns a logger and an alert topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    /// 1C accounting actions.
    Action1C,
    /// Amazon reports.
    AmazonReport,
    /// Public API reports.
    ApiReport,
    /// Internal data.
    Innerdata,
    /// Manager workspace.
    Manager,
    /// Marketplace statistics.
    Mpstats,
    /// Noon reports.
    NoonReport,
    /// Ozon reports.
    OzonReport,
    /// Ozon finance.
    OzonFinance,
    /// QR supplies.
    QrSupplies,
    /// Self-reported data.
    SelfReport,
    /// Supplier orders.
    SupOrder,
    /// Wildberries finance.
    WberFinance,
    /// Wildberries reports.
    WberReport,
    /// Lamoda reports.
    LamdReport,
    /// Marketplace union.
    Mpunion,
}

impl ServiceName {
    /// Every registered service.
    pub const ALL: [Self; 16] = [
        Self::Action1C,
        Self::AmazonReport,
        Self::ApiReport,
        Self::Innerdata,
        Self::Manager,
        Self::Mpstats,
        Self::NoonReport,
        Self::OzonReport,
        Self::OzonFinance,
        Self::QrSupplies,
        Self::SelfReport,
        Self::SupOrder,
        Self::WberFinance,
        Self::WberReport,
        Self::LamdReport,
        Self::Mpunion,
    ];

    /// Full service name, also used as the log filename.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action1C => "Action1C",
            Self::AmazonReport => "AmazonReport",
            Self::ApiReport => "ApiReport",
            Self::Innerdata => "Innerdata",
            Self::Manager => "Manager",
            Self::Mpstats => "Mpstats",
            Self::NoonReport => "NoonReport",
            Self::OzonReport => "OzonReport",
            Self::OzonFinance => "OzonFinance",
            Self::QrSupplies => "QrSupplies",
            Self::SelfReport => "SelfReport",
            Self::SupOrder => "SupOrder",
            Self::WberFinance => "WberFinance",
            Self::WberReport => "WberReport",
            Self::LamdReport => "LamdReport",
            Self::Mpunion => "Mpunion",
        }
    }

    /// Four-letter tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Action1C => "ac1c",
            Self::AmazonReport => "amaz",
            Self::ApiReport => "apir",
            Self::Innerdata => "idat",
            Self::Manager => "mngr",
            Self::Mpstats => "stat",
            Self::NoonReport => "noon",
            Self::OzonReport | Self::OzonFinance => "ozon",
            Self::QrSupplies => "qrsp",
            Self::SelfReport => "self",
            Self::SupOrder => "spor",
            Self::WberFinance => "wbef",
            Self::WberReport => "wber",
            Self::LamdReport => "lamd",
            Self::Mpunion => "mpun",
        }
    }

    /// Alert topic id, when the service has its own topic.
    #[must_use]
    pub const fn topic_id(self) -> Option<u64> {
        match self {
            Self::Action1C => Some(32),
            Self::AmazonReport => Some(34),
            Self::ApiReport => Some(36),
            Self::Innerdata => Some(38),
            Self::Manager => Some(40),
            Self::Mpstats => Some(42),
            Self::NoonReport => Some(44),
            Self::OzonReport => Some(46),
            Self::QrSupplies => Some(48),
            Self::SelfReport | Self::Mpunion => Some(50),
            Self::SupOrder => Some(52),
            Self::WberFinance => Some(2),
            Self::WberReport => Some(4),
            Self::OzonFinance | Self::LamdReport => None,
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|service| service.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownService {
                value: input.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_entries_resolve() {
        assert_eq!(ServiceName::WberReport.tag(), "wber");
        assert_eq!(ServiceName::WberReport.topic_id(), Some(4));
        assert_eq!(ServiceName::OzonFinance.tag(), "ozon");
        assert_eq!(ServiceName::LamdReport.topic_id(), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "wberreport".parse::<ServiceName>(),
            Ok(ServiceName::WberReport)
        );
        assert!(matches!(
            "Unknown".parse::<ServiceName>(),
            Err(ConfigError::UnknownService { .. })
        ));
    }
}
