//! Transaction storage and the transactions JSON API.

mod api;
mod db;
mod domain;

pub use api::{
    TransactionCreatedResponse, TransactionListResponse, create_transaction_endpoint,
    get_transactions_endpoint,
};
pub use db::{
    RECENT_TRANSACTION_LIMIT, create_transaction, create_transaction_table,
    get_recent_transactions,
};
pub use domain::{NewTransaction, Transaction, TransactionId};
