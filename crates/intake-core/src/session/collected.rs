use serde::{Deserialize, Serialize};

/// Facts gathered from the conversation for the summary panel.
///
/// `symptoms` holds distinct keywords in first-seen order and only grows
/// until the session is reset. `resolution` holds the most recently
/// extracted recommendation digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedInfo {
    symptoms: Vec<String>,
    resolution: Option<String>,
}

impl CollectedInfo {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Symptom keywords collected so far.
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// The latest resolution digest, if one was extracted.
    pub fn resolution(&self) -> Option<&str> {
        self.resolution.as_deref()
    }

    /// True when nothing has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty() && self.resolution.is_none()
    }

    /// Unions `symptoms` into the record, skipping ones already present.
    ///
    /// Returns how many new entries were added.
    pub fn merge_symptoms<I, S>(&mut self, symptoms: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.symptoms.len();
        for symptom in symptoms {
            let symptom = symptom.into();
            if !self.symptoms.contains(&symptom) {
                self.symptoms.push(symptom);
            }
        }
        self.symptoms.len() - before
    }

    /// Replaces the resolution with a newly extracted one.
    pub fn set_resolution(&mut self, resolution: impl Into<String>) {
        self.resolution = Some(resolution.into());
    }
}
