//! Validated search parameters

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::fold;
use crate::error::DomainError;
use crate::value_objects::MbtiType;

/// Which fields a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    All,
    Name,
    Description,
    Tag,
    Mbti,
}

impl SearchType {
    pub const fn as_str(self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::Name => "name",
            SearchType::Description => "description",
            SearchType::Tag => "tag",
            SearchType::Mbti => "mbti",
        }
    }
}

impl FromStr for SearchType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SearchType::All),
            "name" => Ok(SearchType::Name),
            "description" => Ok(SearchType::Description),
            "tag" => Ok(SearchType::Tag),
            "mbti" => Ok(SearchType::Mbti),
            _ => Err(DomainError::InvalidSearchType(s.to_string())),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering hint for results with equal relevance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopularityFilter {
    /// Most-voted first
    Popular,
    /// Newest first
    Recent,
    #[default]
    All,
}

impl FromStr for PopularityFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popular" => Ok(PopularityFilter::Popular),
            "recent" => Ok(PopularityFilter::Recent),
            "all" => Ok(PopularityFilter::All),
            _ => Err(DomainError::InvalidPopularityFilter(s.to_string())),
        }
    }
}

/// Optional narrowing applied after matching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Keep only celebrities with at least one vote of this type
    pub mbti_type: Option<MbtiType>,
    /// Keep only celebrities with a tag containing this text (folded)
    pub tag: Option<String>,
    pub popularity: PopularityFilter,
}

impl SearchFilters {
    /// Parse raw filter parameters. Blank values count as absent.
    pub fn parse(
        mbti_type: Option<&str>,
        tag: Option<&str>,
        popularity: Option<&str>,
    ) -> Result<Self, DomainError> {
        let mbti_type = match non_blank(mbti_type) {
            Some(code) => Some(
                code.parse::<MbtiType>()
                    .map_err(|_| DomainError::InvalidMbtiType(code.to_string()))?,
            ),
            None => None,
        };
        let popularity = match non_blank(popularity) {
            Some(p) => p.parse()?,
            None => PopularityFilter::All,
        };
        Ok(Self {
            mbti_type,
            tag: non_blank(tag).map(fold),
            popularity,
        })
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    needle: String,
    search_type: SearchType,
    mbti: Option<MbtiType>,
    pub filters: SearchFilters,
}

impl SearchQuery {
    /// Validate the query text for the given search type.
    ///
    /// The text is trimmed; blank text is rejected, and `mbti` searches
    /// require the text to be one of the 16 codes.
    pub fn new(text: &str, search_type: SearchType) -> Result<Self, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptySearchQuery);
        }
        let mbti = if search_type == SearchType::Mbti {
            Some(
                text.parse::<MbtiType>()
                    .map_err(|_| DomainError::InvalidMbtiType(text.to_string()))?,
            )
        } else {
            None
        };
        Ok(Self {
            text: text.to_string(),
            needle: fold(text),
            search_type,
            mbti,
            filters: SearchFilters::default(),
        })
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Trimmed query as typed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Folded query used for matching
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    /// Target type of an `mbti` search
    pub fn mbti(&self) -> Option<MbtiType> {
        self.mbti
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
