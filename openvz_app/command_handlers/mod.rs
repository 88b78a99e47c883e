mod add_container;
mod delete_container;
mod update_container;

pub use add_container::AddContainerCommandHandler;
pub use delete_container::DeleteContainerCommandHandler;
pub use update_container::UpdateContainerCommandHandler;
