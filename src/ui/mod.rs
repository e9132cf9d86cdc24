pub mod batch;
pub mod individual;
pub mod panels;
pub mod plot;
