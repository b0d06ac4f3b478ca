pub mod feed;
pub mod fetch;
