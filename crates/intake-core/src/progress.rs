/// Percentage shown on the progress bar for a given message count.
///
/// Each rendered message is worth ten percent, capped at 100.
pub fn progress(message_count: u32) -> u8 {
    message_count.saturating_mul(10).min(100) as u8
}
