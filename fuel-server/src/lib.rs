//! Fuel station locator and price tracker.
//!
//! A web application that answers: "which stations are near me, and what
//! are they charging?" Drivers register stations and report the prices they
//! see; the server validates reports against plausible ranges and derives
//! the latest price per fuel type from each station's history.

pub mod config;
pub mod domain;
pub mod pricing;
pub mod proximity;
pub mod service;
pub mod store;
pub mod web;
