pub mod monitor_commands;
