//! Data models for the catalog

pub mod author;
pub mod book;
pub mod loan;

pub use author::Author;
pub use book::{Book, UpdateBook};
pub use loan::{BookLoanCount, Loan, LoanAggregates, LoanSummary, UpdateLoan};
