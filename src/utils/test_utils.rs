#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::ui::theme::Theme;

#[cfg(test)]
pub fn create_test_app() -> App {
    App::new(
        "http://chat.test/chat".to_string(),
        None,
        Theme::dark_default(),
    )
    .unwrap()
}
