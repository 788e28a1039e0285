//! # roster-service
//!
//! Application layer: voting with a daily quota, vote statistics, celebrity
//! search and the MBTI catalogue.

pub mod dto;
pub mod services;

pub use services::{
    CelebrityService, MbtiService, NewCelebrity, SearchService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StatsService, VoteService,
};
