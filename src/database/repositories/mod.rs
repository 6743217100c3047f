pub mod schedule;
pub mod worker;

// Re-export all repositories for easy importing
pub use schedule::ScheduleRepository;
pub use worker::WorkerRepository;
