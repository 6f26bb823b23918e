pub mod f64;
pub mod i32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f64::ImageF64;
pub use self::i32::ImageI32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
