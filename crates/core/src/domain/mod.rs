pub mod dataset;
pub mod portfolio;
pub mod sentiment;
