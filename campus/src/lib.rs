//! A small HTTP service that stores student records in a document database.
//!
//! Requests flow router → controller → [`service`] (the persistence gateway)
//! → a `campus-core` document store backed by MongoDB or, for local runs and
//! tests, an in-memory store.
//!
//! # Routes
//!
//! | Method | Path                     | Result                         |
//! |--------|--------------------------|--------------------------------|
//! | GET    | `/`                      | `Hello World!`                 |
//! | POST   | `/api/v1/students`       | 201 with the created student   |
//! | GET    | `/api/v1/students`       | 200 with every student         |
//! | GET    | `/api/v1/students/{id}`  | 200, or 404 when absent        |

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
