//! Query workloads for the `employees` sample schema.
//!
//! Two catalogs are provided:
//! - [`CrmAction`]: the pooled CRM simulation. Twelve weighted entries over ten
//!   actions (login and profile views appear twice).
//! - [`HrisAction`]: thirty equally weighted HR back-office scenarios.
//!
//! Every action issues exactly one parameterized statement through a
//! [`SqlExecutor`] and ignores the rows it gets back. The executor for real
//! runs is `mysql_async::Pool`, configured through [`PoolSettings`].

pub mod crm;
pub mod error;
pub mod executor;
pub mod hris;
pub mod params;
pub mod pool;
pub mod statement;
pub mod testing;
pub mod workload;

pub use crm::{crm_catalog, CrmAction, CRM_CATALOG};
pub use error::WorkloadError;
pub use executor::SqlExecutor;
pub use hris::{hris_catalog, HrisAction};
pub use pool::{ping, PoolSettings, DEFAULT_CONN_MAX_LIFETIME};
pub use statement::{QueryParam, Statement};
pub use workload::Workload;
