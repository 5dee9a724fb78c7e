pub mod fna;
pub mod organism;
pub mod ptt;
