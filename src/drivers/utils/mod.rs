pub mod input_normalizer;

pub use input_normalizer::InputNormalizer;
