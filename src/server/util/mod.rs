pub mod csv;
pub mod parse;
pub mod password;
pub mod upload;
