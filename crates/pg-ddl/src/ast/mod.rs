pub mod column;
pub mod constraint;
pub mod expr;
pub mod table;
