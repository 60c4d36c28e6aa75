mod gui;
mod layout;

fn main() -> iced::Result {
    env_logger::init();
    gui::run()
}
