pub mod tweak;
