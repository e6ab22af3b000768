pub mod postgres_user_repository;
pub mod user_repository;

#[cfg(test)]
pub mod mock_db;
