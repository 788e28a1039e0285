//! In-memory implementation of every repository trait
//!
//! All tables sit behind one mutex, so each trait call is atomic with respect
//! to every other call. Used by service tests and local runs without
//! PostgreSQL; the behavior mirrors the SQL repositories, including the
//! all-or-nothing semantics of `record_vote` and `remove_vote`.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use roster_core::entities::{Celebrity, CelebrityWithTags, DailyStat, NewVote, Tag, Vote};
use roster_core::error::DomainError;
use roster_core::search::{contains_ci, fold, paginate, rank, RankedCelebrity, SearchCandidate, SearchQuery};
use roster_core::traits::{
    CelebrityRepository, DailyStatRepository, MbtiCount, RepoResult, SearchRepository,
    TagRepository, TagUsage, VoteFilter, VoteRepository,
};
use roster_core::value_objects::{MbtiType, Snowflake};

#[derive(Debug, Default)]
struct Tables {
    celebrities: BTreeMap<Snowflake, Celebrity>,
    tags: BTreeMap<Snowflake, Tag>,
    /// (celebrity_id, tag_id)
    celebrity_tags: BTreeSet<(Snowflake, Snowflake)>,
    votes: BTreeMap<Snowflake, Vote>,
    daily_stats: BTreeMap<(Snowflake, NaiveDate), DailyStat>,
}

impl Tables {
    fn tags_of(&self, celebrity_id: Snowflake) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .celebrity_tags
            .range((celebrity_id, Snowflake::new(i64::MIN))..=(celebrity_id, Snowflake::new(i64::MAX)))
            .filter_map(|(_, tag_id)| self.tags.get(tag_id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    fn vote_counts_of(&self, celebrity_id: Snowflake) -> BTreeMap<MbtiType, i64> {
        let mut counts = BTreeMap::new();
        for vote in self.votes.values().filter(|v| v.celebrity_id == celebrity_id) {
            *counts.entry(vote.mbti_type).or_insert(0) += 1;
        }
        counts
    }

    fn votes_matching<'a>(&'a self, filter: &'a VoteFilter) -> impl Iterator<Item = &'a Vote> {
        self.votes.values().filter(move |v| filter.matches(v))
    }
}

/// Shared in-memory store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored daily counter row (test inspection)
    pub fn daily_stats(&self) -> Vec<DailyStat> {
        self.tables.lock().daily_stats.values().cloned().collect()
    }

    /// Every stored vote (test inspection)
    pub fn votes(&self) -> Vec<Vote> {
        self.tables.lock().votes.values().cloned().collect()
    }

    /// Insert a vote as-is, bypassing quota and counters (test fixtures for
    /// backdated votes)
    pub fn insert_vote_unchecked(&self, vote: Vote) {
        let mut tables = self.tables.lock();
        let key = (vote.user_id, vote.vote_date());
        let stat = tables
            .daily_stats
            .entry(key)
            .or_insert_with(|| DailyStat::new(vote.id, vote.user_id, key.1));
        stat.record(vote.has_reason());
        tables.votes.insert(vote.id, vote);
    }
}

fn page<T>(items: impl Iterator<Item = T>, skip: i64, limit: i64) -> Vec<T> {
    items
        .skip(usize::try_from(skip).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect()
}

fn suggestions<'a>(
    values: impl Iterator<Item = &'a str>,
    needle: &str,
    limit: i64,
) -> Vec<String> {
    let needle = fold(needle);
    let matched: BTreeSet<&str> = values.filter(|v| contains_ci(v, &needle)).collect();
    page(matched.into_iter().map(str::to_string), 0, limit)
}

#[async_trait]
impl CelebrityRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Celebrity>> {
        Ok(self.tables.lock().celebrities.get(&id).cloned())
    }

    async fn find_with_tags(&self, id: Snowflake) -> RepoResult<Option<CelebrityWithTags>> {
        let tables = self.tables.lock();
        Ok(tables.celebrities.get(&id).map(|c| CelebrityWithTags {
            celebrity: c.clone(),
            tags: tables.tags_of(id),
        }))
    }

    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(self.tables.lock().celebrities.contains_key(&id))
    }

    async fn create(&self, celebrity: &Celebrity) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.celebrities.contains_key(&celebrity.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate celebrity id {}",
                celebrity.id
            )));
        }
        tables.celebrities.insert(celebrity.id, celebrity.clone());
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.tables.lock().celebrities.len() as i64)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Tag>> {
        Ok(self
            .tables
            .lock()
            .tags
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn create(&self, tag: &Tag) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.tags.values().any(|t| t.name == tag.name) {
            return Err(DomainError::DuplicateTag(tag.name.clone()));
        }
        tables.tags.insert(tag.id, tag.clone());
        Ok(())
    }

    async fn find_or_create(&self, tag: &Tag) -> RepoResult<Tag> {
        let mut tables = self.tables.lock();
        if let Some(existing) = tables.tags.values().find(|t| t.name == tag.name) {
            return Ok(existing.clone());
        }
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag.clone())
    }

    async fn attach(&self, celebrity_id: Snowflake, tag_id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if !tables.celebrities.contains_key(&celebrity_id) {
            return Err(DomainError::CelebrityNotFound(celebrity_id));
        }
        if !tables.tags.contains_key(&tag_id) {
            return Err(DomainError::TagNotFound(tag_id.to_string()));
        }
        tables.celebrity_tags.insert((celebrity_id, tag_id));
        Ok(())
    }

    async fn find_by_celebrity(&self, celebrity_id: Snowflake) -> RepoResult<Vec<Tag>> {
        Ok(self.tables.lock().tags_of(celebrity_id))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.tables.lock().tags.len() as i64)
    }

    async fn most_used(&self, limit: i64) -> RepoResult<Vec<TagUsage>> {
        let tables = self.tables.lock();
        let mut per_tag: BTreeMap<Snowflake, i64> = BTreeMap::new();
        for (_, tag_id) in &tables.celebrity_tags {
            *per_tag.entry(*tag_id).or_insert(0) += 1;
        }
        let mut usage: Vec<TagUsage> = per_tag
            .into_iter()
            .filter_map(|(tag_id, count)| {
                tables.tags.get(&tag_id).map(|t| TagUsage {
                    name: t.name.clone(),
                    count,
                })
            })
            .collect();
        usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        Ok(page(usage.into_iter(), 0, limit))
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Vote>> {
        Ok(self.tables.lock().votes.get(&id).cloned())
    }

    async fn list(&self, filter: &VoteFilter, skip: i64, limit: i64) -> RepoResult<Vec<Vote>> {
        let tables = self.tables.lock();
        let mut votes: Vec<&Vote> = tables.votes_matching(filter).collect();
        votes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(page(votes.into_iter().cloned(), skip, limit))
    }

    async fn count(&self, filter: &VoteFilter) -> RepoResult<i64> {
        Ok(self.tables.lock().votes_matching(filter).count() as i64)
    }

    async fn mbti_counts(&self, filter: &VoteFilter) -> RepoResult<Vec<MbtiCount>> {
        let tables = self.tables.lock();
        let mut counts: BTreeMap<MbtiType, i64> = BTreeMap::new();
        for vote in tables.votes_matching(filter) {
            *counts.entry(vote.mbti_type).or_insert(0) += 1;
        }
        let mut counts: Vec<MbtiCount> = counts
            .into_iter()
            .map(|(mbti_type, count)| MbtiCount { mbti_type, count })
            .collect();
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.mbti_type.as_str().cmp(b.mbti_type.as_str()))
        });
        Ok(counts)
    }

    async fn most_voted_celebrities(&self, limit: i64) -> RepoResult<Vec<(Snowflake, i64)>> {
        let tables = self.tables.lock();
        let mut totals: BTreeMap<Snowflake, i64> = BTreeMap::new();
        for vote in tables.votes.values() {
            *totals.entry(vote.celebrity_id).or_insert(0) += 1;
        }
        let mut totals: Vec<(Snowflake, i64)> = totals.into_iter().collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        Ok(page(totals.into_iter(), 0, limit))
    }

    async fn record_vote(&self, vote: &NewVote, daily_limit: i32) -> RepoResult<Vote> {
        let mut tables = self.tables.lock();

        if !tables.celebrities.contains_key(&vote.celebrity_id) {
            return Err(DomainError::CelebrityNotFound(vote.celebrity_id));
        }
        if tables
            .votes
            .values()
            .any(|v| v.user_id == vote.user_id && v.celebrity_id == vote.celebrity_id)
        {
            return Err(DomainError::DuplicateVote);
        }
        let key = (vote.user_id, vote.vote_date());
        let votes_today = tables.daily_stats.get(&key).map_or(0, |s| s.votes_count);
        if votes_today >= daily_limit {
            return Err(DomainError::DailyVoteLimitReached { limit: daily_limit });
        }

        tables
            .daily_stats
            .entry(key)
            .or_insert_with(|| DailyStat::new(vote.id, vote.user_id, key.1))
            .record(vote.has_reason());
        let stored = vote.clone().into_vote();
        tables.votes.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn remove_vote(&self, vote_id: Snowflake, requester: Snowflake) -> RepoResult<Vote> {
        let mut tables = self.tables.lock();

        let vote = tables
            .votes
            .get(&vote_id)
            .cloned()
            .ok_or(DomainError::VoteNotFound(vote_id))?;
        if !vote.is_owned_by(requester) {
            return Err(DomainError::NotVoteOwner);
        }

        tables.votes.remove(&vote_id);
        let key = (vote.user_id, vote.vote_date());
        let emptied = tables
            .daily_stats
            .get_mut(&key)
            .is_some_and(|stat| stat.retract(vote.has_reason()));
        if emptied {
            tables.daily_stats.remove(&key);
        }
        Ok(vote)
    }
}

#[async_trait]
impl DailyStatRepository for InMemoryStore {
    async fn find(&self, user_id: Snowflake, date: NaiveDate) -> RepoResult<Option<DailyStat>> {
        Ok(self.tables.lock().daily_stats.get(&(user_id, date)).cloned())
    }

    async fn recent(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<DailyStat>> {
        let tables = self.tables.lock();
        let recent = tables
            .daily_stats
            .values()
            .filter(|s| s.user_id == user_id)
            .rev()
            .cloned();
        Ok(page(recent, 0, limit))
    }
}

#[async_trait]
impl SearchRepository for InMemoryStore {
    async fn search(
        &self,
        query: &SearchQuery,
        skip: i64,
        limit: i64,
    ) -> RepoResult<Vec<RankedCelebrity>> {
        let candidates: Vec<SearchCandidate> = {
            let tables = self.tables.lock();
            tables
                .celebrities
                .values()
                .map(|c| SearchCandidate {
                    celebrity: c.clone(),
                    tags: tables.tags_of(c.id),
                    vote_counts: tables.vote_counts_of(c.id),
                })
                .collect()
        };
        let (page, _) = paginate(
            rank(candidates, query),
            usize::try_from(skip).unwrap_or(0),
            usize::try_from(limit).unwrap_or(0),
        );
        Ok(page)
    }

    async fn suggest_names(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>> {
        let tables = self.tables.lock();
        Ok(suggestions(
            tables.celebrities.values().map(|c| c.name.as_str()),
            needle,
            limit,
        ))
    }

    async fn suggest_english_names(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>> {
        let tables = self.tables.lock();
        Ok(suggestions(
            tables.celebrities.values().filter_map(|c| c.name_en.as_deref()),
            needle,
            limit,
        ))
    }

    async fn suggest_tags(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>> {
        let tables = self.tables.lock();
        let names: HashSet<&str> = tables.tags.values().map(|t| t.name.as_str()).collect();
        Ok(suggestions(names.into_iter(), needle, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn celebrity(id: i64, name: &str) -> Celebrity {
        Celebrity::new(Snowflake::new(id), name.to_string())
    }

    fn new_vote(id: i64, user: i64, celeb: i64, reason: Option<&str>) -> NewVote {
        NewVote::new(
            Snowflake::new(id),
            Snowflake::new(user),
            Snowflake::new(celeb),
            MbtiType::Intj,
            reason.map(str::to_string),
        )
        .unwrap()
    }

    async fn store_with_celebrities(n: i64) -> InMemoryStore {
        let store = InMemoryStore::new();
        for id in 1..=n {
            CelebrityRepository::create(&store, &celebrity(id, &format!("Celeb {id}")))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_record_vote_updates_counters() {
        let store = store_with_celebrities(2).await;

        store.record_vote(&new_vote(100, 7, 1, None), 10).await.unwrap();
        store.record_vote(&new_vote(101, 7, 2, Some("why")), 10).await.unwrap();

        let stats = store.daily_stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].votes_count, 2);
        assert_eq!(stats[0].votes_no_reason_count, 1);
        assert_eq!(stats[0].id, Snowflake::new(100));
    }

    #[tokio::test]
    async fn test_record_vote_check_order() {
        let store = store_with_celebrities(2).await;
        store.record_vote(&new_vote(100, 7, 1, None), 1).await.unwrap();

        // Missing celebrity wins over everything
        let err = store.record_vote(&new_vote(101, 7, 99, None), 1).await.unwrap_err();
        assert!(matches!(err, DomainError::CelebrityNotFound(_)));

        // Duplicate is reported before the quota
        let err = store.record_vote(&new_vote(102, 7, 1, None), 1).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateVote));

        let err = store.record_vote(&new_vote(103, 7, 2, None), 1).await.unwrap_err();
        assert!(matches!(err, DomainError::DailyVoteLimitReached { limit: 1 }));
        assert_eq!(store.votes().len(), 1);
        assert_eq!(store.daily_stats()[0].votes_count, 1);
    }

    #[tokio::test]
    async fn test_remove_vote_drops_empty_counter() {
        let store = store_with_celebrities(1).await;
        let vote = store.record_vote(&new_vote(100, 7, 1, None), 10).await.unwrap();

        let err = store.remove_vote(vote.id, Snowflake::new(8)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotVoteOwner));
        assert_eq!(store.votes().len(), 1);

        store.remove_vote(vote.id, Snowflake::new(7)).await.unwrap();
        assert!(store.votes().is_empty());
        assert!(store.daily_stats().is_empty());

        let err = store.remove_vote(vote.id, Snowflake::new(7)).await.unwrap_err();
        assert!(matches!(err, DomainError::VoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_backdated_vote_touches_its_own_day() {
        let store = store_with_celebrities(2).await;
        let mut old = new_vote(100, 7, 1, None).into_vote();
        old.created_at = Utc::now() - Duration::days(3);
        store.insert_vote_unchecked(old.clone());
        store.record_vote(&new_vote(101, 7, 2, None), 10).await.unwrap();
        assert_eq!(store.daily_stats().len(), 2);

        store.remove_vote(old.id, Snowflake::new(7)).await.unwrap();
        let stats = store.daily_stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_tags_and_most_used() {
        let store = store_with_celebrities(2).await;
        let singer = store
            .find_or_create(&Tag::new(Snowflake::new(50), "歌手".to_string()))
            .await
            .unwrap();
        let again = store
            .find_or_create(&Tag::new(Snowflake::new(51), "歌手".to_string()))
            .await
            .unwrap();
        assert_eq!(singer.id, again.id);

        let actor = store
            .find_or_create(&Tag::new(Snowflake::new(52), "演员".to_string()))
            .await
            .unwrap();
        store.attach(Snowflake::new(1), singer.id).await.unwrap();
        store.attach(Snowflake::new(2), singer.id).await.unwrap();
        store.attach(Snowflake::new(2), actor.id).await.unwrap();

        let usage = store.most_used(10).await.unwrap();
        assert_eq!(usage[0].name, "歌手");
        assert_eq!(usage[0].count, 2);
        assert_eq!(store.find_by_celebrity(Snowflake::new(2)).await.unwrap().len(), 2);

        let err = TagRepository::create(&store, &Tag::new(Snowflake::new(53), "演员".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_list_filters_and_pages_newest_first() {
        let store = store_with_celebrities(3).await;
        for (i, celeb) in (1..=3).enumerate() {
            let mut vote = new_vote(100 + celeb, 7, celeb, None).into_vote();
            vote.created_at = Utc::now() - Duration::minutes(10 - i as i64);
            store.insert_vote_unchecked(vote);
        }

        let all = store.list(&VoteFilter::by_user(Snowflake::new(7)), 0, 10).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|v| v.id.into_inner()).collect();
        assert_eq!(ids, vec![103, 102, 101]);

        let second = store.list(&VoteFilter::default(), 1, 1).await.unwrap();
        assert_eq!(second[0].id, Snowflake::new(102));
        assert_eq!(
            VoteRepository::count(&store, &VoteFilter::by_celebrity(Snowflake::new(2)))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_suggestions_are_case_insensitive() {
        let store = InMemoryStore::new();
        CelebrityRepository::create(&store, &celebrity(1, "周杰伦").with_name_en("Jay Chou"))
            .await
            .unwrap();
        CelebrityRepository::create(&store, &celebrity(2, "Jay Park"))
            .await
            .unwrap();

        assert_eq!(
            store.suggest_names("JAY", 10).await.unwrap(),
            vec!["Jay Park".to_string()]
        );
        assert_eq!(
            store.suggest_english_names("jay", 10).await.unwrap(),
            vec!["Jay Chou".to_string()]
        );
    }
}
