mod cursor_file;

pub use cursor_file::FileCursorStore;
