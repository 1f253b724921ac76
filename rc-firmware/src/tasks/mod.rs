// Task-Modul: Enthält die Embassy Tasks
//
// Der Actuation-Task ist der einzige Consumer der Kanal-Arena.
// Producer ist der GPIO-Interrupt (siehe hal::edge_input).

pub mod actuation;

// Re-export Tasks für einfachen Import
pub use actuation::{actuation_logic, actuation_task};
