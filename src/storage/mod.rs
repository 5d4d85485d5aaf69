//! Storage layer: where the country list comes from and where it is kept.
//!
//! The list is fetched from a remote source exactly once per process and held in
//! memory afterwards. Nothing is persisted to disk.
//!
//! # Modules
//!
//! - `backend`: [`CountrySource`] trait for remote sources
//! - `rest`: REST Countries HTTP implementation
//! - `memory`: in-memory source for offline use and tests
//! - `models`: wire record types separate from the domain model
//! - `cache`: [`CountryStore`], the fetch-once cache

pub mod backend;
pub mod cache;
pub mod memory;
pub mod models;
pub mod rest;

pub use backend::CountrySource;
pub use cache::CountryStore;
pub use memory::InMemorySource;
pub use models::CountryRecord;
pub use rest::RestCountriesClient;
