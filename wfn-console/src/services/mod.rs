pub mod activity;
pub mod metrics;
pub mod pages;
