pub mod budget;
pub mod spending;
pub mod wastage;

pub use budget::BudgetCommands;
pub use spending::SpendingCommands;
pub use wastage::WastageCommands;
