//! Rule tables for Linux distributions.

pub mod centos;
pub mod ubuntu;
