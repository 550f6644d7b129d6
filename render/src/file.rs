use std::path::Path;
use crate::error::RenderError;

pub mod prelude {
    pub use super::{Load, Save};
}

pub trait Load
    where Self: Sized
{
    fn load(filepath: impl AsRef<Path>) -> Result<Self, RenderError>;
}

pub trait Save {
    fn save(&self, filepath: impl AsRef<Path>) -> Result<(), RenderError>;
}

pub fn read_entire_file<P>(filepath: P) -> std::io::Result<Vec<u8>>
    where P: AsRef<Path>
{
    use std::io::Read;

    let f = std::fs::File::open(filepath)?;
    let mut v = Vec::new();
    std::io::BufReader::new(f).read_to_end(&mut v)?;

    Ok(v)
}
