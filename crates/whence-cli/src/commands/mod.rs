pub mod check;
pub mod describe;
pub mod last;
pub mod next;
