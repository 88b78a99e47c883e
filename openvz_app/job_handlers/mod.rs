pub mod add_container;

pub use add_container::AddContainerJobHandler;
