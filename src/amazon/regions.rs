//! Product Advertising API marketplaces: endpoints, retail domains and currencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplaces served by the 2013-08-01 Product Advertising API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Uk,
    De,
    Fr,
    Es,
    It,
    Ca,
    Cn,
    Jp,
    In,
    Br,
    Mx,
}

impl Region {
    /// Returns the API endpoint host for this region.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Region::Us => "webservices.amazon.com",
            Region::Uk => "webservices.amazon.co.uk",
            Region::De => "webservices.amazon.de",
            Region::Fr => "webservices.amazon.fr",
            Region::Es => "webservices.amazon.es",
            Region::It => "webservices.amazon.it",
            Region::Ca => "webservices.amazon.ca",
            Region::Cn => "webservices.amazon.cn",
            Region::Jp => "webservices.amazon.co.jp",
            Region::In => "webservices.amazon.in",
            Region::Br => "webservices.amazon.com.br",
            Region::Mx => "webservices.amazon.com.mx",
        }
    }

    /// Returns the API base URL for this region.
    pub fn api_base_url(&self) -> String {
        format!("https://{}", self.endpoint())
    }

    /// Returns the retail Amazon domain for this region.
    pub fn domain(&self) -> &'static str {
        match self {
            Region::Us => "amazon.com",
            Region::Uk => "amazon.co.uk",
            Region::De => "amazon.de",
            Region::Fr => "amazon.fr",
            Region::Es => "amazon.es",
            Region::It => "amazon.it",
            Region::Ca => "amazon.ca",
            Region::Cn => "amazon.cn",
            Region::Jp => "amazon.co.jp",
            Region::In => "amazon.in",
            Region::Br => "amazon.com.br",
            Region::Mx => "amazon.com.mx",
        }
    }

    /// Returns the retail storefront URL for this region.
    pub fn base_url(&self) -> String {
        format!("https://www.{}", self.domain())
    }

    /// Returns the currency code for this region.
    pub fn currency(&self) -> &'static str {
        match self {
            Region::Us => "USD",
            Region::Uk => "GBP",
            Region::De | Region::Fr | Region::Es | Region::It => "EUR",
            Region::Ca => "CAD",
            Region::Cn => "CNY",
            Region::Jp => "JPY",
            Region::In => "INR",
            Region::Br => "BRL",
            Region::Mx => "MXN",
        }
    }

    /// Divisor turning an API `Amount` into a major-unit price.
    ///
    /// Amounts are in the smallest currency unit; yen has none below 1.
    pub fn minor_unit_divisor(&self) -> f64 {
        match self {
            Region::Jp => 1.0,
            _ => 100.0,
        }
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[
            Region::Us,
            Region::Uk,
            Region::De,
            Region::Fr,
            Region::Es,
            Region::It,
            Region::Ca,
            Region::Cn,
            Region::Jp,
            Region::In,
            Region::Br,
            Region::Mx,
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Region::Us => "us",
            Region::Uk => "uk",
            Region::De => "de",
            Region::Fr => "fr",
            Region::Es => "es",
            Region::It => "it",
            Region::Ca => "ca",
            Region::Cn => "cn",
            Region::Jp => "jp",
            Region::In => "in",
            Region::Br => "br",
            Region::Mx => "mx",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "usa" | "united states" => Ok(Region::Us),
            "uk" | "gb" | "united kingdom" => Ok(Region::Uk),
            "de" | "germany" => Ok(Region::De),
            "fr" | "france" => Ok(Region::Fr),
            "es" | "spain" => Ok(Region::Es),
            "it" | "italy" => Ok(Region::It),
            "ca" | "canada" => Ok(Region::Ca),
            "cn" | "china" => Ok(Region::Cn),
            "jp" | "japan" => Ok(Region::Jp),
            "in" | "india" => Ok(Region::In),
            "br" | "brazil" => Ok(Region::Br),
            "mx" | "mexico" => Ok(Region::Mx),
            _ => Err(RegionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionParseError(String);

impl fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown region '{}'. Valid regions: us, uk, de, fr, es, it, ca, cn, jp, in, br, mx",
            self.0
        )
    }
}

impl std::error::Error for RegionParseError {}
