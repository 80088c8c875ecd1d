pub mod bank_loader;

pub use bank_loader::{BankLoader, PoolSource, SubjectPools};
