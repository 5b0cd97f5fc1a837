pub mod market;
pub mod molit;
