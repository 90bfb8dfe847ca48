pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provision;
pub mod session;
pub mod stats;

pub use client::TricountClient;
pub use config::UpstreamConfig;
pub use error::TricountError;
pub use model::{Allocation, LedgerSnapshot, Member, RegistryMetadata, Transaction};
pub use normalize::{normalize, registry_metadata};
pub use provision::KeyMaterial;
pub use session::{Session, SessionAuth};
pub use stats::{StatsSummary, aggregate};
