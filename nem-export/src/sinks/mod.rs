pub mod csv_file;
pub mod table;

pub use csv_file::{output_as_csv, transposed_file_name};
pub use table::{output_as_tables, to_data_frame};
