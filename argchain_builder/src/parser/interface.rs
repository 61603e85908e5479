use crate::parser::base::ExtractError;

pub(crate) trait UserInterface {
    fn print_error(&self, error: ExtractError);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print_error(&self, error: ExtractError) {
        eprintln!("{error}");
    }
}
