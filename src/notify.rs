use colored::Colorize;

/// Fire-and-forget success notifications
pub trait Notifier {
    /// Reports a successful operation to the user
    fn notify_success(&self, message: &str);
}

/// Prints notifications to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        println!("{}", message.green());
    }
}
