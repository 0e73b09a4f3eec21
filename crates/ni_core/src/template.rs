use crate::types::Article;

/// Placeholder subject used by the template corpus.
pub const PLACEHOLDER_SUBJECT: &str = "Company X";

/// Replaces every occurrence of `placeholder` in `template` with `subject`.
///
/// An empty subject or placeholder leaves the template untouched. The
/// replacement is not re-scanned, so a subject that itself contains the
/// placeholder is inserted verbatim.
pub fn substitute_subject(template: &str, placeholder: &str, subject: &str) -> String {
    if subject.is_empty() || placeholder.is_empty() {
        return template.to_string();
    }
    template.replace(placeholder, subject)
}

impl Article {
    /// Returns a copy with the subject substituted into title and summary.
    pub fn with_subject(&self, placeholder: &str, subject: &str) -> Article {
        Article {
            title: substitute_subject(&self.title, placeholder, subject),
            summary: substitute_subject(&self.summary, placeholder, subject),
            ..self.clone()
        }
    }
}
