//! NASA tools module.
//!
//! - `client`: blocking GET helper with timeout and error classification
//! - `apod`: Astronomy Picture of the Day
//! - `images`: Image and Video Library search
//!
//! Each tool has handlers for both HTTP and STDIO/TCP transports.

pub mod apod;
pub mod client;
pub mod common;
pub mod images;

pub use apod::{ApodFetcher, GetApodDataParams, GetApodDataTool};
pub use images::{ImageSearchFetcher, SearchImagesDataParams, SearchImagesDataTool};
