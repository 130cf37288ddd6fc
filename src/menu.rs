use colored::Colorize;
use inquire::Select;

use crate::error::AppError;

/// Chooses one saved profile when the command line did not name one
pub trait ProfilePicker {
    /// # Arguments
    /// * `prompt` - Question shown to the user
    /// * `profiles` - Profile names to choose from, already sorted
    fn pick(&self, prompt: &str, profiles: Vec<String>) -> Result<String, AppError>;
}

/// Interactive terminal selection
#[derive(Debug, Default)]
pub struct InquirePicker;

impl ProfilePicker for InquirePicker {
    fn pick(&self, prompt: &str, profiles: Vec<String>) -> Result<String, AppError> {
        let selected: String = Select::new(&format!("{}", prompt.blue()), profiles).prompt()?;
        Ok(selected)
    }
}
