//! Route handlers. Each builds one authorization subject for the request and
//! discards it when the response is produced.

pub mod authorize;
pub mod status;
