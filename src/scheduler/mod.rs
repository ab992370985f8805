pub mod reset_signals;
