pub mod compare;
pub mod sip;
pub mod swp;
pub mod tvm;
