pub mod value;
pub mod document;
pub mod query;
pub mod store;
pub mod errors;


pub use value::Value;
pub use document::{CollectionRef, Document};
pub use query::{Direction, QuerySpec};
pub use store::{DocumentIter, DocumentStore};
pub use errors::{Result, PerfError};
