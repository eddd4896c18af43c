pub mod categories;
pub mod event_expenses;
pub mod events;
pub mod transactions;
pub mod users;

pub use categories as category_entity;
pub use event_expenses as event_expense_entity;
pub use events as event_entity;
pub use transactions as transaction_entity;
pub use users as user_entity;
