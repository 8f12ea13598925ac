// Library for tests to access modules

pub mod backfill;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod planner_repo;
pub mod routes;
