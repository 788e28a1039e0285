//! Relevance scoring and ordering

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::{contains_ci, PopularityFilter, SearchQuery, SearchType};
use crate::entities::{Celebrity, Tag};
use crate::value_objects::MbtiType;

const EXACT_NAME_SCORE: i64 = 100;
const NAME_CONTAINS_SCORE: i64 = 80;
const DESCRIPTION_SCORE: i64 = 60;
const TAG_SCORE: i64 = 40;

/// Which rule produced a result's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExactMatch,
    NameContains,
    DescriptionMatch,
    TagMatch,
    NameMatch,
    MbtiMatch,
}

impl MatchType {
    pub const fn as_str(self) -> &'static str {
        match self {
            MatchType::ExactMatch => "exact_match",
            MatchType::NameContains => "name_contains",
            MatchType::DescriptionMatch => "description_match",
            MatchType::TagMatch => "tag_match",
            MatchType::NameMatch => "name_match",
            MatchType::MbtiMatch => "mbti_match",
        }
    }

    /// Recover the rule behind a score computed for `search_type`.
    ///
    /// Inverse of [`score`] for backends that score in storage. Returns
    /// `None` for a score no rule of that search type produces.
    pub fn from_score(search_type: SearchType, relevance: i64) -> Option<MatchType> {
        match (search_type, relevance) {
            (SearchType::All, EXACT_NAME_SCORE) => Some(MatchType::ExactMatch),
            (SearchType::All, NAME_CONTAINS_SCORE) => Some(MatchType::NameContains),
            (SearchType::All | SearchType::Description, DESCRIPTION_SCORE) => {
                Some(MatchType::DescriptionMatch)
            }
            (SearchType::All | SearchType::Tag, TAG_SCORE) => Some(MatchType::TagMatch),
            (SearchType::Name, EXACT_NAME_SCORE | NAME_CONTAINS_SCORE) => Some(MatchType::NameMatch),
            (SearchType::Mbti, votes) if votes > 0 => Some(MatchType::MbtiMatch),
            _ => None,
        }
    }
}

/// A celebrity as loaded for ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub celebrity: Celebrity,
    pub tags: Vec<Tag>,
    /// Votes per MBTI type; types without votes are absent
    pub vote_counts: BTreeMap<MbtiType, i64>,
}

impl SearchCandidate {
    pub fn votes_for(&self, mbti: MbtiType) -> i64 {
        self.vote_counts.get(&mbti).copied().unwrap_or(0)
    }

    pub fn total_votes(&self) -> i64 {
        self.vote_counts.values().sum()
    }
}

/// A matched celebrity with its relevance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCelebrity {
    pub celebrity: Celebrity,
    pub tags: Vec<Tag>,
    pub relevance_score: i64,
    pub match_type: MatchType,
    pub total_votes: i64,
}

/// Score one candidate, or `None` when it does not match.
///
/// Filters are not applied here; see [`rank`].
pub fn score(candidate: &SearchCandidate, query: &SearchQuery) -> Option<(i64, MatchType)> {
    let needle = query.needle();
    let celeb = &candidate.celebrity;

    let exact_name = || {
        celeb.name.to_lowercase() == needle
            || celeb.name_en.as_deref().is_some_and(|en| en.to_lowercase() == needle)
    };
    let name_contains = || {
        contains_ci(&celeb.name, needle)
            || celeb.name_en.as_deref().is_some_and(|en| contains_ci(en, needle))
    };
    let description = || {
        celeb
            .description
            .as_deref()
            .is_some_and(|d| contains_ci(d, needle))
    };
    let tag = || candidate.tags.iter().any(|t| contains_ci(&t.name, needle));

    match query.search_type() {
        SearchType::All => {
            if exact_name() {
                Some((EXACT_NAME_SCORE, MatchType::ExactMatch))
            } else if name_contains() {
                Some((NAME_CONTAINS_SCORE, MatchType::NameContains))
            } else if description() {
                Some((DESCRIPTION_SCORE, MatchType::DescriptionMatch))
            } else if tag() {
                Some((TAG_SCORE, MatchType::TagMatch))
            } else {
                None
            }
        }
        SearchType::Name => {
            if exact_name() {
                Some((EXACT_NAME_SCORE, MatchType::NameMatch))
            } else if name_contains() {
                Some((NAME_CONTAINS_SCORE, MatchType::NameMatch))
            } else {
                None
            }
        }
        SearchType::Description => {
            description().then_some((DESCRIPTION_SCORE, MatchType::DescriptionMatch))
        }
        SearchType::Tag => tag().then_some((TAG_SCORE, MatchType::TagMatch)),
        SearchType::Mbti => {
            let votes = candidate.votes_for(query.mbti()?);
            (votes > 0).then_some((votes, MatchType::MbtiMatch))
        }
    }
}

/// Match, filter and order candidates.
///
/// Order is descending score, then (for the `popular` filter) descending
/// total votes, then newest first, then descending id.
pub fn rank(candidates: Vec<SearchCandidate>, query: &SearchQuery) -> Vec<RankedCelebrity> {
    let filters = &query.filters;

    let mut ranked: Vec<RankedCelebrity> = candidates
        .into_iter()
        .filter(|c| filters.mbti_type.map_or(true, |t| c.votes_for(t) > 0))
        .filter(|c| {
            filters
                .tag
                .as_deref()
                .map_or(true, |tag| c.tags.iter().any(|t| contains_ci(&t.name, tag)))
        })
        .filter_map(|c| {
            let (relevance_score, match_type) = score(&c, query)?;
            let total_votes = c.total_votes();
            Some(RankedCelebrity {
                celebrity: c.celebrity,
                tags: c.tags,
                relevance_score,
                match_type,
                total_votes,
            })
        })
        .collect();

    let by_popularity = filters.popularity == PopularityFilter::Popular;
    ranked.sort_by(|a, b| {
        b.relevance_score
            .cmp(&a.relevance_score)
            .then_with(|| {
                if by_popularity {
                    b.total_votes.cmp(&a.total_votes)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| b.celebrity.created_at.cmp(&a.celebrity.created_at))
            .then_with(|| b.celebrity.id.cmp(&a.celebrity.id))
    });
    ranked
}

/// Slice one page out of a ranked list.
///
/// `has_more` is true when the page is full, which may report a further page
/// that turns out to be empty.
pub fn paginate<T>(items: Vec<T>, skip: usize, limit: usize) -> (Vec<T>, bool) {
    let page: Vec<T> = items.into_iter().skip(skip).take(limit).collect();
    let has_more = limit > 0 && page.len() == limit;
    (page, has_more)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchFilters;
    use crate::value_objects::Snowflake;
    use chrono::{Duration, Utc};

    fn candidate(id: i64, name: &str) -> SearchCandidate {
        SearchCandidate {
            celebrity: Celebrity::new(Snowflake::new(id), name.to_string())
                .with_created_at(Utc::now() - Duration::days(id)),
            tags: Vec::new(),
            vote_counts: BTreeMap::new(),
        }
    }

    fn tag(id: i64, name: &str) -> Tag {
        Tag::new(Snowflake::new(id), name.to_string())
    }

    fn query(text: &str, search_type: SearchType) -> SearchQuery {
        SearchQuery::new(text, search_type).unwrap()
    }

    #[test]
    fn test_all_mode_rule_precedence() {
        let mut exact = candidate(1, "Jay");
        exact.celebrity.description = Some("jay jay jay".to_string());
        let contains = candidate(2, "Jay Chou");
        let mut described = candidate(3, "周杰伦");
        described.celebrity.description = Some("Known as Jay".to_string());
        let mut tagged = candidate(4, "林俊杰");
        tagged.tags.push(tag(10, "jay-fans"));

        let q = query("jay", SearchType::All);
        assert_eq!(score(&exact, &q), Some((100, MatchType::ExactMatch)));
        assert_eq!(score(&contains, &q), Some((80, MatchType::NameContains)));
        assert_eq!(score(&described, &q), Some((60, MatchType::DescriptionMatch)));
        assert_eq!(score(&tagged, &q), Some((40, MatchType::TagMatch)));
        assert_eq!(score(&candidate(5, "王菲"), &q), None);
    }

    #[test]
    fn test_english_name_counts_as_name() {
        let c = candidate(1, "周杰伦").celebrity.with_name_en("Jay Chou");
        let c = SearchCandidate {
            celebrity: c,
            tags: Vec::new(),
            vote_counts: BTreeMap::new(),
        };
        assert_eq!(
            score(&c, &query("JAY CHOU", SearchType::All)),
            Some((100, MatchType::ExactMatch))
        );
        assert_eq!(
            score(&c, &query("chou", SearchType::Name)),
            Some((80, MatchType::NameMatch))
        );
    }

    #[test]
    fn test_from_score_inverts_score() {
        let mut c = candidate(1, "Jay");
        c.celebrity.description = Some("singer".to_string());
        c.tags.push(tag(2, "mandopop"));
        c.vote_counts.insert(MbtiType::Infj, 3);

        let cases = [
            ("jay", SearchType::All),
            ("ja", SearchType::All),
            ("sing", SearchType::All),
            ("pop", SearchType::All),
            ("jay", SearchType::Name),
            ("j", SearchType::Name),
            ("singer", SearchType::Description),
            ("mando", SearchType::Tag),
            ("INFJ", SearchType::Mbti),
        ];
        for (text, search_type) in cases {
            let (relevance, match_type) = score(&c, &query(text, search_type)).unwrap();
            assert_eq!(MatchType::from_score(search_type, relevance), Some(match_type));
        }

        assert_eq!(MatchType::from_score(SearchType::Tag, 100), None);
        assert_eq!(MatchType::from_score(SearchType::Mbti, 0), None);
    }

    #[test]
    fn test_exact_match_ranks_above_substring() {
        let older_exact = candidate(30, "Faye");
        let newer_contains = candidate(1, "Faye Wong");
        let ranked = rank(
            vec![newer_contains, older_exact],
            &query("faye", SearchType::All),
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].celebrity.name, "Faye");
        assert_eq!(ranked[0].relevance_score, 100);
        assert_eq!(ranked[1].relevance_score, 80);
    }

    #[test]
    fn test_tag_search_finds_singer() {
        let mut jay = candidate(1, "周杰伦");
        jay.tags.push(tag(7, "歌手"));
        let mut actor = candidate(2, "刘德华");
        actor.tags.push(tag(8, "演员"));

        let ranked = rank(vec![jay, actor], &query("歌手", SearchType::Tag));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].celebrity.name, "周杰伦");
        assert_eq!(ranked[0].match_type, MatchType::TagMatch);
        assert_eq!(ranked[0].relevance_score, 40);
    }

    #[test]
    fn test_single_field_modes_ignore_other_fields() {
        let mut c = candidate(1, "Jay");
        c.tags.push(tag(2, "singer"));
        assert_eq!(score(&c, &query("singer", SearchType::Name)), None);
        assert_eq!(score(&c, &query("singer", SearchType::Description)), None);
        assert_eq!(score(&c, &query("jay", SearchType::Tag)), None);
    }

    #[test]
    fn test_mbti_mode_scores_by_vote_count() {
        let mut many = candidate(1, "A");
        many.vote_counts.insert(MbtiType::Infp, 5);
        many.vote_counts.insert(MbtiType::Entj, 9);
        let mut few = candidate(2, "B");
        few.vote_counts.insert(MbtiType::Infp, 2);
        let mut none = candidate(3, "C");
        none.vote_counts.insert(MbtiType::Entj, 3);

        let ranked = rank(vec![few, none, many], &query("infp", SearchType::Mbti));
        let got: Vec<_> = ranked
            .iter()
            .map(|r| (r.celebrity.name.as_str(), r.relevance_score, r.match_type))
            .collect();
        assert_eq!(
            got,
            vec![("A", 5, MatchType::MbtiMatch), ("B", 2, MatchType::MbtiMatch)]
        );
        assert_eq!(ranked[0].total_votes, 14);
    }

    #[test]
    fn test_ties_are_newest_first() {
        // candidate(id) is created `id` days ago
        let ranked = rank(
            vec![candidate(3, "Jay A"), candidate(1, "Jay B"), candidate(2, "Jay C")],
            &query("jay", SearchType::All),
        );
        let names: Vec<_> = ranked.iter().map(|r| r.celebrity.name.as_str()).collect();
        assert_eq!(names, vec!["Jay B", "Jay C", "Jay A"]);
    }

    #[test]
    fn test_popular_filter_breaks_ties_by_votes() {
        let newest = candidate(1, "Jay A");
        let mut voted = candidate(2, "Jay B");
        voted.vote_counts.insert(MbtiType::Istj, 4);

        let q = query("jay", SearchType::All);
        let default_order = rank(vec![newest.clone(), voted.clone()], &q);
        assert_eq!(default_order[0].celebrity.name, "Jay A");

        let q = q.with_filters(SearchFilters {
            popularity: PopularityFilter::Popular,
            ..SearchFilters::default()
        });
        let popular_order = rank(vec![newest, voted], &q);
        assert_eq!(popular_order[0].celebrity.name, "Jay B");
    }

    #[test]
    fn test_filters_narrow_results() {
        let mut a = candidate(1, "Jay A");
        a.vote_counts.insert(MbtiType::Intj, 1);
        a.tags.push(tag(1, "Singer"));
        let mut b = candidate(2, "Jay B");
        b.tags.push(tag(2, "singer"));

        let q = query("jay", SearchType::All).with_filters(SearchFilters {
            mbti_type: Some(MbtiType::Intj),
            ..SearchFilters::default()
        });
        let ranked = rank(vec![a.clone(), b.clone()], &q);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].celebrity.name, "Jay A");

        let q = query("jay", SearchType::All).with_filters(SearchFilters {
            tag: Some("sing".to_string()),
            ..SearchFilters::default()
        });
        assert_eq!(rank(vec![a.clone(), b.clone()], &q).len(), 2);

        let q = query("jay", SearchType::All).with_filters(SearchFilters {
            tag: Some("actor".to_string()),
            ..SearchFilters::default()
        });
        assert!(rank(vec![a, b], &q).is_empty());
    }

    #[test]
    fn test_paginate_has_more_is_page_size_heuristic() {
        let items: Vec<i32> = (0..5).collect();
        assert_eq!(paginate(items.clone(), 0, 2), (vec![0, 1], true));
        assert_eq!(paginate(items.clone(), 4, 2), (vec![4], false));
        // A full final page still reports more
        assert_eq!(paginate(items.clone(), 3, 2), (vec![3, 4], true));
        assert_eq!(paginate(items, 10, 2), (vec![], false));
    }
}
