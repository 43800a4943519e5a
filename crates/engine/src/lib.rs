pub use categories::Category;
pub use credentials::{CredentialService, TokenIdentity};
pub use error::{DomainError, EngineError, FieldErrors};
pub use kinds::EntryKind;
pub use ops::{Engine, EngineBuilder};
pub use requests::{
    AuthOutcome, CategoryRecord, CreateCategoryCmd, CreateTransactionCmd, DeleteCategoryCmd,
    DeleteTransactionCmd, GetCategoryQuery, GetTransactionQuery, ListCategoriesQuery,
    ListTransactionsQuery, LoginUserCmd, RegisterUserCmd, TransactionListFilter,
    TransactionRecord, UpdateCategoryCmd, UpdateTransactionCmd,
};
pub use transactions::Transaction;
pub use users::User;

mod categories;
mod credentials;
mod error;
mod kinds;
mod ops;
mod requests;
mod transactions;
mod users;

pub type ResultEngine<T> = Result<T, EngineError>;
