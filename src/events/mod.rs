pub mod forms;
pub mod gallery;
pub mod pointer;
