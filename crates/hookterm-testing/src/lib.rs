//! Testing utilities and harness for hookterm

mod harness;
mod terminal;

pub use harness::TestHarness;
pub use terminal::{buffer_text, TestInput, TestScreen, TestTerminal};

pub mod prelude {
    pub use crate::{buffer_text, TestHarness, TestInput, TestScreen, TestTerminal};
}
