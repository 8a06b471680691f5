pub mod budget;
pub mod dispatch;
pub mod input;
pub mod schema;
pub mod spending;
pub mod wastage;
