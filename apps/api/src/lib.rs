//! Resume Desk
//!
//! Backend for worker résumé drafts collected by a conversational bot,
//! PDF/HTML export of persisted résumés, and the recruiter review dashboard.

pub mod config;
pub mod db;
pub mod drafts;
pub mod errors;
pub mod models;
pub mod render;
pub mod review;
pub mod routes;
pub mod state;
