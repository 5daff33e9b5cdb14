//! 查找能力实现

mod in_memory;
mod postgres;
mod rows;

pub use in_memory::InMemoryPartnerLookup;
pub use postgres::PostgresPartnerLookup;
