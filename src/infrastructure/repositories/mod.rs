//! Repository implementations using SeaORM

pub mod employee_repository;

pub use employee_repository::SeaOrmEmployeeRepository;
