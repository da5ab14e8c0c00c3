mod fake_system;

pub use fake_system::FakeSystem;
