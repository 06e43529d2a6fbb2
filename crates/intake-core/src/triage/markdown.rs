/// Removes markdown emphasis markers (`**`, `__`, `*`, `_`) from `text`.
///
/// Every asterisk and underscore is dropped, including ones inside words.
pub fn strip_markdown(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '*' | '_')).collect()
}
