use std::path::PathBuf;

pub struct Config {
    /// Dataset the range table is built from.
    ///
    /// `.json` files are read as a service tag document, anything else as a
    /// plain list of CIDR blocks.
    pub data_path: PathBuf,
    /// Verbosity reduction, `-q` once hides headers, twice hides per-range details.
    pub quiet: u8,
}
