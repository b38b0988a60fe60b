pub mod show_row;
