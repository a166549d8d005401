
/// Transaction commit/rollback behaviour the batch endpoint relies on
pub mod transaction_tests;
