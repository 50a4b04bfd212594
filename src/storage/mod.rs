pub mod memory;
pub mod emulator;

pub use memory::MemoryStore;
pub use emulator::EmulatorStore;
