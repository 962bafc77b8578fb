pub mod ranker;
pub mod result_writer;
pub mod scorer;

pub use ranker::{rank, DEFAULT_TOP_K};
pub use result_writer::ResultWriter;
pub use scorer::{score, score_restaurant};
