pub mod noise;
pub mod shapes;

pub use shapes::WaveShape;
