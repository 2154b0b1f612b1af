//! Result summarizer.
//!
//! Metrics ([`favorability`], [`gender_ratio`], [`min_friends`]) are used
//! both by the trial runner's fitness comparison and by [`Summary`], the
//! report handed to front ends.

mod metrics;
mod report;

pub use metrics::{
    favorability, friend_count, gender_ratio, min_friends, worst_favorability, MinFriends,
};
pub use report::{DisplayNames, GroupSummary, Summary};
