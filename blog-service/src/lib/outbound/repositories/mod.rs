pub mod article;
pub mod memory;
pub mod user;

pub use article::PostgresArticleRepository;
pub use memory::InMemoryRepository;
pub use user::PostgresUserRepository;
