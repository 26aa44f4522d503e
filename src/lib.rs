//! CRUD backend for a registry of foreign students (etudiants), their degree
//! track (filieres), academic level (niveaus) and country of origin (pays).
//!
//! Every read goes through one joined query per entity: the entity table
//! left-outer-joined with each referenced table, hydrated into records with
//! nested references. Writes are plain row operations; PATCH merges only
//! the fields present on the payload into the stored row.

pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod migrations;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod query;
pub mod routes;
pub mod sort;
pub mod traits;

pub use errors::ApiError;
pub use traits::CrudResource;
