//! Line classification: flags administrative noise so it is excluded from
//! medicine search.
//!
//! A pure per-line predicate. Categories are independent; a line matching
//! any one of them is noise. Never consults neighboring lines, which keeps
//! classification O(1) per line.

use std::sync::LazyLock;

use regex::Regex;

/// Why a line was classified as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseCategory {
    /// Professional title or facility word at the start of the line.
    FacilityHeader,
    /// Contact-information keyword or URL-looking token.
    ContactInfo,
    /// The line is exactly a numeric date.
    BareDate,
    /// Demographic field label followed by a colon.
    DemographicLabel,
    /// "Rx" or "prescription" token followed by a number.
    RxNumber,
    /// Long digit-only run, phone or account numbers.
    DigitRun,
    /// Two-letter state code followed by a 5-digit postal code.
    StateZip,
}

struct NoisePattern {
    regex: Regex,
    category: NoiseCategory,
}

static NOISE_PATTERNS: LazyLock<Vec<NoisePattern>> = LazyLock::new(|| {
    vec![
        pattern(
            r"(?i)^(dr\.?|doctor|physician|clinic|hospital|pharmacy)\b",
            NoiseCategory::FacilityHeader,
        ),
        pattern(
            r"(?i)\b(phone|fax|address|email|website)\b|www\.|https?://",
            NoiseCategory::ContactInfo,
        ),
        pattern(
            r"^\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}$",
            NoiseCategory::BareDate,
        ),
        pattern(
            r"(?i)^(patient|name|dob|address|city|state|zip)\s*:",
            NoiseCategory::DemographicLabel,
        ),
        pattern(
            r"(?i)^(rx|prescription)\s*#?\s*\d+",
            NoiseCategory::RxNumber,
        ),
        pattern(r"^\d{10,}$", NoiseCategory::DigitRun),
        pattern(
            r"(?i)^[a-z]{2}\s+\d{5}(-\d{4})?$",
            NoiseCategory::StateZip,
        ),
    ]
});

fn pattern(regex_str: &str, category: NoiseCategory) -> NoisePattern {
    NoisePattern {
        regex: Regex::new(regex_str).expect("invalid noise pattern"),
        category,
    }
}

/// Classify a line, returning the first matching noise category.
pub fn classify_noise(line: &str) -> Option<NoiseCategory> {
    let trimmed = line.trim();
    NOISE_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(trimmed))
        .map(|p| p.category)
}

/// True when the line is administrative noise.
pub fn is_noise_line(line: &str) -> bool {
    classify_noise(line).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_header_is_noise() {
        assert_eq!(
            classify_noise("Dr. Jane Smith, MD"),
            Some(NoiseCategory::FacilityHeader)
        );
        assert!(is_noise_line("CLINIC OF FAMILY MEDICINE"));
        assert!(is_noise_line("Pharmacy: Main Street"));
    }

    #[test]
    fn contact_line_is_noise() {
        assert_eq!(
            classify_noise("Phone: 555-1234"),
            Some(NoiseCategory::ContactInfo)
        );
        assert!(is_noise_line("Call our office, fax 555-9876"));
        assert!(is_noise_line("visit www.example-clinic.org"));
        assert!(is_noise_line("https://portal.example.org/refills"));
    }

    #[test]
    fn doctor_with_phone_is_noise() {
        // Matches two categories; either one is enough.
        assert!(is_noise_line("Dr. Jane Smith, Phone: 555-1234"));
    }

    #[test]
    fn bare_date_is_noise() {
        assert_eq!(classify_noise("12/03/2024"), Some(NoiseCategory::BareDate));
        assert!(is_noise_line("1-5-24"));
        assert!(is_noise_line("03.12.2024"));
    }

    #[test]
    fn date_embedded_in_text_is_not_noise() {
        assert!(!is_noise_line("Start 12/03/2024 with Metformin"));
    }

    #[test]
    fn demographic_label_is_noise() {
        assert_eq!(
            classify_noise("Patient: John Doe"),
            Some(NoiseCategory::DemographicLabel)
        );
        assert!(is_noise_line("DOB: 01/01/1980"));
        assert!(is_noise_line("Name : Jane"));
    }

    #[test]
    fn rx_number_is_noise() {
        assert_eq!(classify_noise("Rx# 1234567"), Some(NoiseCategory::RxNumber));
        assert!(is_noise_line("RX 884620"));
        assert!(is_noise_line("Prescription #42"));
    }

    #[test]
    fn long_digit_run_is_noise() {
        assert_eq!(classify_noise("5551234567"), Some(NoiseCategory::DigitRun));
        assert!(is_noise_line("12345678901234"));
        // Nine digits is below the phone/account cutoff.
        assert!(!is_noise_line("123456789"));
    }

    #[test]
    fn state_zip_is_noise() {
        assert_eq!(classify_noise("CA 94110"), Some(NoiseCategory::StateZip));
        assert!(is_noise_line("ny 10001-1234"));
    }

    #[test]
    fn medicine_lines_are_not_noise() {
        assert!(!is_noise_line("Lisinopril 10mg once daily"));
        assert!(!is_noise_line("Take 2 tablets with meals"));
        assert!(!is_noise_line("Metformin 500mg"));
    }

    #[test]
    fn rx_without_number_is_not_noise() {
        assert!(!is_noise_line("Rx for hypertension"));
    }
}
