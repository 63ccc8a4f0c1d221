//! Small recursive filters shared by the kpp engines.

pub mod dc_blocker;
pub mod one_pole;
