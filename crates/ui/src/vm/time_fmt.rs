/// `m:ss` rendering of a countdown.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}
