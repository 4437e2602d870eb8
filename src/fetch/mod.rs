pub mod endpoints;
pub mod error;
pub mod http_fetcher;
pub mod payloads;
#[cfg(test)]
pub(crate) mod stub;
