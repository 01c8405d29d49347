//! Typed access to the backend REST API.
//!
//! [`ApiClient`] owns transport and envelope decoding; each resource gets a
//! thin borrowed wrapper with one method per endpoint:
//!
//! ```ignore
//! let page = client.hosts().list(&HostFilter::default()).await?;
//! client.applications().save_graph(3, &graph).await?;
//! ```

pub mod applications;
pub mod auth;
pub mod client;
pub mod collections;
pub mod config;
pub mod hosts;
pub mod import;
pub mod platforms;
pub mod query;
pub mod scans;
pub mod tags;

pub use applications::ApplicationsApi;
pub use auth::AuthApi;
pub use client::ApiClient;
pub use collections::CollectionsApi;
pub use config::ConfigApi;
pub use hosts::HostsApi;
pub use import::ImportApi;
pub use platforms::PlatformsApi;
pub use scans::ScansApi;
pub use tags::TagsApi;

impl ApiClient {
    pub fn hosts(&self) -> HostsApi<'_> {
        HostsApi::new(self)
    }

    pub fn platforms(&self) -> PlatformsApi<'_> {
        PlatformsApi::new(self)
    }

    pub fn scans(&self) -> ScansApi<'_> {
        ScansApi::new(self)
    }

    pub fn collections(&self) -> CollectionsApi<'_> {
        CollectionsApi::new(self)
    }

    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi::new(self)
    }

    pub fn applications(&self) -> ApplicationsApi<'_> {
        ApplicationsApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn config(&self) -> ConfigApi<'_> {
        ConfigApi::new(self)
    }

    pub fn import(&self) -> ImportApi<'_> {
        ImportApi::new(self)
    }
}
