pub mod notification;
pub mod persistence;
pub mod storage;
