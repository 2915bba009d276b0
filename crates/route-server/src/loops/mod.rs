//! Background tasks.

pub mod session_loop;
