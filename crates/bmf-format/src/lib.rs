//! Reader and writer for the BMF binary mesh format.

pub mod decode;
pub mod encode;
pub mod errors;
pub mod layout;
pub mod load;

pub use decode::{decode, RawMesh};
pub use encode::encode;
pub use errors::{FormatError, LoadError};
pub use load::{load_base64, load_file, unwrap_base64};
