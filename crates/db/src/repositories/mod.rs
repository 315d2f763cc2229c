mod audit_repo;
mod availability_repo;
mod customer_repo;
mod property_repo;
mod reservation_repo;

pub use audit_repo::AuditLogRepo;
pub use availability_repo::AvailabilityRepo;
pub use customer_repo::CustomerRepo;
pub use property_repo::PropertyRepo;
pub use reservation_repo::ReservationRepo;
