pub mod classifier;
pub mod confirmation;
pub mod intake;
pub mod listing;
