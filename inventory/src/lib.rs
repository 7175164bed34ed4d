pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod location;
pub mod operations;
pub mod properties;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::InventoryClient;
pub use config::InventoryConfig;
pub use error::{InventoryError, InventoryResult, LocationDependency};
pub use http::HttpTransport;
pub use operations::Operation;
pub use properties::properties_to_inputs;
pub use transport::{GraphQlError, GraphQlRequest, GraphQlResponse, GraphQlTransport};
pub use types::{
    Document, ImageEntity, Location, LocationType, PropertyKind, PropertyType, PropertyValue,
};

pub mod prelude {
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::http::*;
    pub use crate::transport::*;
    pub use crate::types::*;
}
