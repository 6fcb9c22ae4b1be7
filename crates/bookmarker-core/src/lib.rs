pub mod config;
pub mod logging;

pub mod bookmark;
pub mod fetch;
pub mod input;
pub mod pacer;
pub mod page;
pub mod pipeline;
pub mod writer;
