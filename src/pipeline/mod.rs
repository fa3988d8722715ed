pub mod actions;
pub mod cancel;
pub mod case_analysis;
pub mod classify;
pub mod drafting;
pub mod extraction;
pub mod import;
pub mod processor;
pub mod structuring;
