//! Client binding for the networking API trunk extension.
//!
//! A trunk aggregates a parent port and any number of VLAN-tagged subports.
//! [`TrunksClient`] issues the CRUD and subport operations against the
//! networking service and returns deferred results that decode on `extract`.
//!
//! ```no_run
//! # async fn demo() -> neutron_trunks::Result<()> {
//! use neutron_trunks::{CreateOpts, Subport, TrunksClientBuilder};
//!
//! let client = TrunksClientBuilder::new("http://network.example.com:9696/")?
//!     .with_token("token")
//!     .build()?;
//!
//! let opts = CreateOpts {
//!     name: Some("trunk0".into()),
//!     sub_ports: vec![Subport::vlan("28e452d7-4f8a-4be4-b1e6-7f3db4c0430b", 100)],
//!     ..CreateOpts::new("c373d2fa-3d3b-4492-924c-aff54dea19b6")
//! };
//! let trunk = client.create(&opts).await.extract()?;
//! println!("{} is {}", trunk.id, trunk.status);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod requests;
pub mod results;
pub mod urls;

pub use client::{TrunksClient, TrunksClientBuilder};
pub use requests::{
    AddSubportsOpts, CreateOpts, ListOpts, RemoveSubport, RemoveSubportsOpts, Subport,
    ToAddSubportsBody, ToRemoveSubportsBody, ToTrunkCreateBody, ToTrunkListQuery,
    ToTrunkUpdateBody, UpdateOpts,
};
pub use results::{
    extract_trunks, AddSubportsResult, CreateResult, DeleteResult, GetResult, GetSubportsResult,
    RemoveSubportsResult, SubportsResult, Trunk, TrunkResult, UpdateResult,
};

/// Convenient result alias sharing the `neutron-core` error type.
pub type Result<T> = neutron_core::Result<T>;
