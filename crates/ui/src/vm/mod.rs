mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{OptionRowVm, QuizIntent, QuizVm, start_quiz};
pub use time_fmt::format_countdown;
