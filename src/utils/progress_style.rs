use indicatif::ProgressStyle;

const ELAPSED_TEMPLATE: &str = "{spinner} [{elapsed:>3}] {wide_msg}";

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn elapsed_message() -> ProgressStyle {
        ProgressStyle::with_template(ELAPSED_TEMPLATE)
            .expect("valid progress template")
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈✓")
    }
}
