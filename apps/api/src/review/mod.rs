//! Recruiter review: listing, search, engagement counts and approval.

pub mod adapter;
pub mod dashboard;
pub mod handlers;
pub mod repository;
