//! Named content-type values for the `Content-Type` request header.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Content types commonly sent by API tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// `application/json`
    Json,
    /// `application/xml`
    Xml,
    /// `application/x-www-form-urlencoded`
    Form,
    /// `text/plain`
    Text,
    /// `text/html`
    Html,
    /// `application/pdf`
    Pdf,
    /// `application/zip`
    Zip,
    /// `image/png`
    Png,
    /// `image/jpeg`
    Jpeg,
    /// `image/gif`
    Gif,
    /// `image/svg+xml`
    Svg,
    /// `image/bmp`
    Bmp,
    /// `image/tiff`
    Tiff,
    /// `application/vnd.ms-powerpoint`
    Ppt,
    /// `application/msword`
    Doc,
    /// `application/vnd.ms-excel`
    Xls,
    /// `text/csv`
    Csv,
    /// `application/xml; charset=utf-8`
    XmlUtf8,
    /// `text/html; charset=utf-8`
    HtmlUtf8,
}

impl ContentType {
    /// Every content type in the table.
    pub const ALL: [Self; 19] = [
        Self::Json,
        Self::Xml,
        Self::Form,
        Self::Text,
        Self::Html,
        Self::Pdf,
        Self::Zip,
        Self::Png,
        Self::Jpeg,
        Self::Gif,
        Self::Svg,
        Self::Bmp,
        Self::Tiff,
        Self::Ppt,
        Self::Doc,
        Self::Xls,
        Self::Csv,
        Self::XmlUtf8,
        Self::HtmlUtf8,
    ];

    /// Returns the header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::Form => "application/x-www-form-urlencoded",
            Self::Text => "text/plain",
            Self::Html => "text/html",
            Self::Pdf => "application/pdf",
            Self::Zip => "application/zip",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Svg => "image/svg+xml",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::Ppt => "application/vnd.ms-powerpoint",
            Self::Doc => "application/msword",
            Self::Xls => "application/vnd.ms-excel",
            Self::Csv => "text/csv",
            Self::XmlUtf8 => "application/xml; charset=utf-8",
            Self::HtmlUtf8 => "text/html; charset=utf-8",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|ct| ct.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownContentType(s.to_string()))
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        content_type.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(ContentType::Jpeg.to_string(), "image/jpeg");
        assert_eq!(ContentType::HtmlUtf8.as_str(), "text/html; charset=utf-8");
    }

    #[test]
    fn test_every_value_parses_back() {
        for ct in ContentType::ALL {
            assert_eq!(ct.as_str().parse::<ContentType>(), Ok(ct));
        }
    }

    #[test]
    fn test_unknown_value() {
        assert!(matches!(
            "application/x-unknown".parse::<ContentType>(),
            Err(DomainError::UnknownContentType(_))
        ));
    }

    #[test]
    fn test_into_string() {
        let header: String = ContentType::Csv.into();
        assert_eq!(header, "text/csv");
    }
}
