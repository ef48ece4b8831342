//! Hypermedia link generation
//!
//! Link policies declare which links a resource carries; the link builder
//! interprets them against a route resolver.

pub mod builder;
pub mod policy;
pub mod routes;

pub use builder::LinkBuilder;
pub use policy::{CollectionLinkPolicy, ItemLinkPolicy, LinkContext, LinkRule};
pub use routes::{RouteError, RouteParams, RouteTable, UrlResolver};
