pub mod augment;
pub mod corpus;
pub mod retriever;
pub mod sqlite;
pub mod store;

pub use retriever::Retriever;
pub use store::{DocumentMatch, StoredDocument, VectorStore};
