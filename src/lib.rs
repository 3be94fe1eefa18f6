pub mod config;
pub mod geometry;
pub mod position;
pub mod store;
pub mod tracker;
pub mod web;
