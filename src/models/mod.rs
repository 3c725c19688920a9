pub mod svm;
pub mod traits;

pub use svm::{Kernel, SvmModel};
pub use traits::{Model, ModelFactory};
