//! インメモリ実装

pub mod attendance;
pub mod class;
pub mod session;

pub use attendance::InMemoryAttendanceRepository;
pub use class::InMemoryClassRepository;
pub use session::InMemorySessionStore;
