pub mod format;
pub mod loan;
