use crate::core::Category;

/// Deduplicates error messages before they reach the display consumer.
///
/// The standing error is cleared only when the category that raised it succeeds again.
#[derive(Default)]
pub struct ErrorReporter {
    standing: Option<StandingError>,
}

struct StandingError {
    category: Category,
    message: String,
}

impl ErrorReporter {
    /// Store the message and return it for emission, unless it repeats the standing one.
    #[must_use]
    pub fn report(&mut self, category: Category, message: String) -> Option<String> {
        if let Some(standing) = &mut self.standing
            && standing.message == message
        {
            standing.category = category;
            return None;
        }
        self.standing = Some(StandingError { category, message: message.clone() });
        Some(message)
    }

    /// Clear the standing error if it was raised by the category.
    ///
    /// Returns whether the error has been cleared.
    #[must_use]
    pub fn resolve(&mut self, category: Category) -> bool {
        if self.standing.as_ref().is_some_and(|standing| standing.category == category) {
            self.standing = None;
            true
        } else {
            false
        }
    }
}
