pub mod audit;
pub mod availability;
pub mod customer;
pub mod property;
pub mod reservation;
