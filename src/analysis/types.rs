use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Dog,
    Cat,
    Rabbit,
    Other,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Rabbit => "Rabbit",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user submitted from the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomRequest {
    pub species: Species,
    pub symptom_text: String,
}

impl SymptomRequest {
    pub fn new(species: Species, symptom_text: impl Into<String>) -> Self {
        Self {
            species,
            symptom_text: symptom_text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.symptom_text.trim().is_empty()
    }
}

/// Wall-clock time spent in one backend call, displayed as `MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elapsed(Duration);

impl Elapsed {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Two-digit minutes; anything past the hundredth minute reads 99:59.
        let secs = self.0.as_secs().min(99 * 60 + 59);
        write!(f, "{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Successful outcome of one inference call.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub generated_text: String,
    pub elapsed: Elapsed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, "00:00")]
    #[case(7, "00:07")]
    #[case(59, "00:59")]
    #[case(60, "01:00")]
    #[case(61, "01:01")]
    #[case(3599, "59:59")]
    #[case(5999, "99:59")]
    #[case(6000, "99:59")]
    #[case(90_000, "99:59")]
    fn test_elapsed_formatting(#[case] secs: u64, #[case] expected: &str) {
        assert_eq!(Elapsed::new(Duration::from_secs(secs)).to_string(), expected);
    }

    #[test]
    fn test_elapsed_truncates_fractions() {
        let elapsed = Elapsed::new(Duration::from_millis(59_999));
        assert_eq!(elapsed.to_string(), "00:59");
        assert!(elapsed.as_secs_f64() > 59.9);
    }

    #[test]
    fn test_elapsed_clamp_keeps_exact_seconds() {
        let elapsed = Elapsed::new(Duration::from_secs(6000));
        assert_eq!(elapsed.to_string(), "99:59");
        assert_eq!(elapsed.as_secs_f64(), 6000.0);
    }

    #[test]
    fn test_species_serde_names() {
        assert_eq!(serde_json::to_string(&Species::Rabbit).unwrap(), "\"Rabbit\"");
        let parsed: Species = serde_json::from_str("\"Cat\"").unwrap();
        assert_eq!(parsed, Species::Cat);
        assert!(serde_json::from_str::<Species>("\"Hamster\"").is_err());
    }

    #[rstest]
    #[case("", true)]
    #[case("   \n\t", true)]
    #[case("limping", false)]
    fn test_blank_detection(#[case] text: &str, #[case] blank: bool) {
        assert_eq!(SymptomRequest::new(Species::Dog, text).is_blank(), blank);
    }
}
