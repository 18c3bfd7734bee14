pub mod fs_scratch_storage;

pub use fs_scratch_storage::FsScratchStorage;
