//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CelebrityRepository, DailyStatRepository, MbtiCount, RepoResult, SearchRepository,
    TagRepository, TagUsage, VoteFilter, VoteRepository,
};
